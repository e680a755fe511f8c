//! Turns engine events into log lines

use pbddns_core::EngineEvent;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

/// Log every event until the engine drops its sender
pub async fn report_events(mut events: mpsc::UnboundedReceiver<EngineEvent>) {
    while let Some(event) = events.recv().await {
        report(&event);
    }
}

fn report(event: &EngineEvent) {
    match event {
        EngineEvent::IpResolved { ip } => info!("External IP address is {}", ip),
        EngineEvent::RecordsListed { root_domain, count } => {
            info!("Found {} record(s) for {}", count, root_domain)
        }
        EngineEvent::DomainRejected {
            root_domain,
            message,
        } => error!("Error getting domain {}: {}", root_domain, message),
        EngineEvent::RecordKept {
            record_type,
            content,
            ..
        } => info!("Existing record is correct: {} {}", record_type, content),
        EngineEvent::RecordDeleted {
            id,
            record_type,
            content,
            response,
        } => {
            info!(
                "Existing record out of date, removed: {} {} (id {})",
                record_type, content, id
            );
            debug!("Response: {}", response);
        }
        EngineEvent::RecordCreated {
            name,
            content,
            response,
        } => {
            let name = if name.is_empty() { "@" } else { name.as_str() };
            info!("Created record: {} with answer {}", name, content);
            debug!("Response: {}", response);
        }
        EngineEvent::Finished { deleted, created } => {
            if *deleted == 0 && !created {
                info!("DNS already up to date");
            } else {
                info!(
                    "Done: {} record(s) removed, {} created",
                    deleted,
                    if *created { 1 } else { 0 }
                );
            }
        }
    }
}
