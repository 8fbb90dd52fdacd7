use ticket_core::model::ticket::KEY_PREFIX;
use ticket_core::validation::today;
use ticket_core::{Ticket, TicketDraft, TicketField, TicketValidationError};

#[test]
fn ticket_new_sets_defaults() {
    let ticket = Ticket::new();

    assert_eq!(ticket.number(), "00000");
    assert_eq!(ticket.series(), "0");
    assert_eq!(ticket.fraction(), "0");
    assert_eq!(ticket.date(), today());
    assert_eq!(ticket.price(), "0");
}

#[test]
fn valid_candidates_are_stored() {
    let mut ticket = Ticket::new();

    ticket.set_number("99999").unwrap();
    ticket.set_series("160").unwrap();
    ticket.set_fraction("9").unwrap();
    ticket.set_date("29/02/2024").unwrap();
    ticket.set_price("99").unwrap();

    assert_eq!(ticket.number(), "99999");
    assert_eq!(ticket.series(), "160");
    assert_eq!(ticket.fraction(), "9");
    assert_eq!(ticket.date(), "29/02/2024");
    assert_eq!(ticket.price(), "99");
}

#[test]
fn rejected_candidates_keep_previous_value() {
    let mut ticket = Ticket::from_candidates("12345", "7", "3", "01/06/2024", "20");

    let cases = [
        (TicketField::Number, "100000"),
        (TicketField::Number, "1234"),
        (TicketField::Series, "161"),
        (TicketField::Series, "07"),
        (TicketField::Fraction, "10"),
        (TicketField::Date, "31/04/2024"),
        (TicketField::Price, "00"),
        (TicketField::Price, "100"),
    ];
    for (field, candidate) in cases {
        let before = ticket.get(field).to_string();
        let err = ticket.set(field, candidate).unwrap_err();
        assert_eq!(
            err,
            TicketValidationError {
                field,
                value: candidate.to_string(),
            }
        );
        assert_eq!(ticket.get(field), before, "{field} changed on `{candidate}`");
    }
}

#[test]
fn ignoring_setter_result_reproduces_silent_rejection() {
    let mut ticket = Ticket::new();
    let _ = ticket.set_price("abc");
    assert_eq!(ticket.price(), "0");
}

#[test]
fn from_candidates_defaults_each_invalid_field_independently() {
    let ticket = Ticket::from_candidates("1234x", "160", "", "30/02/2024", "5");

    assert_eq!(ticket.number(), "00000");
    assert_eq!(ticket.series(), "160");
    assert_eq!(ticket.fraction(), "0");
    assert_eq!(ticket.date(), today());
    assert_eq!(ticket.price(), "5");
}

#[test]
fn field_table_keys_are_namespaced_and_unique() {
    let keys: Vec<&str> = TicketField::ALL.iter().map(|field| field.key()).collect();
    assert_eq!(
        keys,
        vec![
            "ticket.number",
            "ticket.series",
            "ticket.fraction",
            "ticket.date",
            "ticket.price",
        ]
    );
    for field in TicketField::ALL {
        assert_eq!(field.key(), format!("{KEY_PREFIX}{}", field.name()));
        assert!(field.is_valid(&field.default_value()));
    }
}

#[test]
fn draft_reports_every_invalid_field() {
    let draft = TicketDraft {
        number: "123".to_string(),
        series: "12".to_string(),
        fraction: "x".to_string(),
        date: "29/02/2023".to_string(),
        price: "7".to_string(),
    };

    assert_eq!(
        draft.invalid_fields(),
        vec![TicketField::Number, TicketField::Fraction, TicketField::Date]
    );
    let errors = draft.validate().unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(errors[0].value, "123");
}

#[test]
fn draft_from_ticket_validates_back_to_same_ticket() {
    let ticket = Ticket::from_candidates("54321", "42", "1", "15/08/2025", "3");
    let draft = TicketDraft::from(&ticket);
    assert_eq!(draft.validate().unwrap(), ticket);
}

#[test]
fn ticket_serialization_uses_field_names() {
    let ticket = Ticket::from_candidates("00042", "1", "2", "01/01/2025", "12");

    let json = serde_json::to_value(&ticket).unwrap();
    assert_eq!(json["number"], "00042");
    assert_eq!(json["series"], "1");
    assert_eq!(json["fraction"], "2");
    assert_eq!(json["date"], "01/01/2025");
    assert_eq!(json["price"], "12");

    let decoded: Ticket = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, ticket);
}

#[test]
fn deserialize_rejects_invalid_field() {
    let value = serde_json::json!({
        "number": "00042",
        "series": "161",
        "fraction": "2",
        "date": "01/01/2025",
        "price": "12"
    });

    let err = serde_json::from_value::<Ticket>(value).unwrap_err();
    assert!(
        err.to_string().contains("invalid series: `161`"),
        "unexpected error: {err}"
    );
}
