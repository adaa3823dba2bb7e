use tera::{Context, Tera};

use chrono::NaiveDate;

use birthy::domain::auth::AuthSession;
use birthy::domain::birthday::{BirthdayPerson, DateRange, bucket_birthdays};
use birthy::domain::types::BadgeVariant;
use birthy::dto::communications::CommunicationRow;
use birthy::dto::people::PersonRow;
use birthy::pagination::Paginated;

fn tera() -> Tera {
    Tera::new("templates/**/*").expect("templates should parse")
}

fn page_context(session: &AuthSession, current_page: &str) -> Context {
    let mut context = Context::new();
    context.insert("alerts", &Vec::<(String, String)>::new());
    context.insert("auth", session);
    context.insert("auth_state", &session.state());
    context.insert("is_admin", &session.is_admin);
    context.insert("current_page", current_page);
    context.insert("current_url", "/");
    context
}

fn admin() -> AuthSession {
    AuthSession {
        api_key: Some("ABC".to_string()),
        is_admin: true,
        ..AuthSession::default()
    }
}

fn people_context(session: &AuthSession, rows: Vec<PersonRow>) -> Context {
    let total = rows.len();
    let mut context = page_context(session, "people");
    context.insert("search_query", "");
    context.insert("name_order", "asc");
    context.insert("birth_date_order", "asc");
    context.insert("sort", &None::<&str>);
    context.insert("order", "asc");
    context.insert("search_params", "");
    context.insert("page_params", "");
    context.insert("people", &Paginated::new(rows, 1, 50, total));
    context
}

fn ada() -> PersonRow {
    PersonRow {
        id: 7,
        name: "Ada Lovelace".to_string(),
        birth_date: "10/12/1815".to_string(),
        application: "slack".to_string(),
        application_label: "Slack".to_string(),
        badge: BadgeVariant::Secondary,
        channel_id: "C42".to_string(),
        user_id: "U1".to_string(),
    }
}

#[test]
fn empty_communication_log_shows_placeholder() {
    let mut context = page_context(&AuthSession::default(), "communications");
    context.insert(
        "communications",
        &Paginated::new(Vec::<CommunicationRow>::new(), 1, 50, 0),
    );

    let html = tera().render("communications/index.html", &context).unwrap();
    assert!(html.contains("Aucune communication enregistrée."));
    assert!(html.contains("Non connecté"));
}

#[test]
fn connection_error_replaces_content() {
    let mut context = page_context(&AuthSession::default(), "communications");
    context.insert("connection_error", "Impossible de joindre le serveur de notifications.");

    let html = tera().render("communications/index.html", &context).unwrap();
    assert!(html.contains("Erreur de connexion"));
    assert!(html.contains("Impossible de joindre le serveur de notifications."));
    assert!(!html.contains("Aucune communication enregistrée."));
}

#[test]
fn people_actions_are_admin_only() {
    let admin_html = tera()
        .render("people/index.html", &people_context(&admin(), vec![ada()]))
        .unwrap();
    assert!(admin_html.contains("/person/7/edit"));
    assert!(admin_html.contains("/person/7/delete"));
    assert!(admin_html.contains("#C42"));
    assert!(admin_html.contains("Administrateur"));

    let reader = AuthSession {
        api_key: Some("READ".to_string()),
        ..AuthSession::default()
    };
    let reader_html = tera()
        .render("people/index.html", &people_context(&reader, vec![ada()]))
        .unwrap();
    assert!(reader_html.contains("Ada Lovelace"));
    assert!(!reader_html.contains("/person/7/edit"));
    assert!(!reader_html.contains("/person/create"));
    assert!(reader_html.contains("Lecture seule"));
}

#[test]
fn empty_people_list_shows_placeholder() {
    let html = tera()
        .render("people/index.html", &people_context(&admin(), Vec::new()))
        .unwrap();
    assert!(html.contains("Aucune personne enregistrée."));
}

#[test]
fn home_page_hides_age_for_future_birth_dates() {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let people = vec![
        BirthdayPerson {
            name: "Ada".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1990, 10, 19).unwrap(),
        },
        BirthdayPerson {
            name: "Typo".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2030, 10, 20).unwrap(),
        },
    ];

    let mut context = page_context(&AuthSession::default(), "index");
    context.insert("range", &DateRange::from_today(today));
    context.insert("buckets", &bucket_birthdays(people, today));

    let html = tera().render("main/index.html", &context).unwrap();
    assert!(html.contains("19/10 · 36 ans"));
    assert!(html.contains("Typo"));
    assert!(!html.contains("-4 ans"));
    assert!(!html.contains("20/10 ·"));
}
