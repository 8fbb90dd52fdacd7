use std::cell::RefCell;
use ticket_core::{
    PropertiesTicketRepository, RepoError, RepoResult, ServiceError, Ticket, TicketDraft,
    TicketField, TicketRepository, TicketService,
};

/// Records saves and serves a fixed load result.
#[derive(Default)]
struct RecordingRepository {
    stored: RefCell<Option<Ticket>>,
    saves: RefCell<u32>,
}

impl TicketRepository for RecordingRepository {
    fn load(&self) -> RepoResult<Ticket> {
        self.stored
            .borrow()
            .clone()
            .ok_or(RepoError::CorruptData {
                field: TicketField::Number,
                value: None,
            })
    }

    fn save(&self, ticket: &Ticket) -> RepoResult<()> {
        *self.saves.borrow_mut() += 1;
        *self.stored.borrow_mut() = Some(ticket.clone());
        Ok(())
    }
}

fn draft(number: &str, series: &str, fraction: &str, date: &str, price: &str) -> TicketDraft {
    TicketDraft {
        number: number.to_string(),
        series: series.to_string(),
        fraction: fraction.to_string(),
        date: date.to_string(),
        price: price.to_string(),
    }
}

#[test]
fn export_then_import_through_file() {
    let dir = tempfile::tempdir().unwrap();
    let service = TicketService::new(PropertiesTicketRepository::new(
        dir.path().join("ticket.properties"),
    ));

    let exported = service
        .export_ticket(&draft("11111", "5", "5", "05/05/2025", "15"))
        .unwrap();
    let imported = service.import_ticket().unwrap();

    assert_eq!(imported, exported);
    assert_eq!(imported.number(), "11111");
}

#[test]
fn export_with_invalid_fields_never_saves() {
    let service = TicketService::new(RecordingRepository::default());

    let err = service
        .export_ticket(&draft("11111", "200", "5", "31/02/2025", "15"))
        .unwrap_err();

    match &err {
        ServiceError::InvalidDraft(errors) => {
            let fields: Vec<TicketField> = errors.iter().map(|e| e.field).collect();
            assert_eq!(fields, vec![TicketField::Series, TicketField::Date]);
        }
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(err.user_message(), "ticket has invalid fields: series, date");
    assert_eq!(*service.repository().saves.borrow(), 0);
}

#[test]
fn export_valid_draft_saves_once() {
    let service = TicketService::new(RecordingRepository::default());

    let saved = service
        .export_ticket(&draft("00000", "0", "0", "01/01/2000", "0"))
        .unwrap();

    assert_eq!(*service.repository().saves.borrow(), 1);
    assert_eq!(service.import_ticket().unwrap(), saved);
}

#[test]
fn import_failure_is_reported_as_corrupt() {
    let service = TicketService::new(RecordingRepository::default());

    let err = service.import_ticket().unwrap_err();
    assert!(matches!(err, ServiceError::Repo(RepoError::CorruptData { .. })));
    assert_eq!(err.user_message(), "stored ticket data is corrupt");
}

#[test]
fn import_missing_file_is_access_failure() {
    let dir = tempfile::tempdir().unwrap();
    let service = TicketService::new(PropertiesTicketRepository::new(
        dir.path().join("missing.properties"),
    ));

    let err = service.import_ticket().unwrap_err();
    assert_eq!(err.user_message(), "ticket file could not be accessed");
}
