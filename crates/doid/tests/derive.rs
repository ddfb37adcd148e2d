//! Tests for the `#[derive(Queryable)]` macro.

use chrono::{NaiveDate, NaiveDateTime};
use doid::{lookup, q, AsValue, ListContainer, QueryError, Queryable, Value};

#[derive(Debug, Clone, PartialEq, Queryable)]
struct Address {
    street: String,
    city: String,
    zip: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Queryable)]
struct Person {
    name: String,
    #[query(rename = "born")]
    birth_date: NaiveDate,
    #[query(nested)]
    address: Address,
    #[query(nested, rename = "work")]
    office: Address,
    tags: Vec<String>,
    score: f32,
    active: bool,
    last_login: Option<NaiveDateTime>,
    #[query(skip)]
    password_hash: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Status {
    Pending,
    Done,
}

impl AsValue for Status {
    fn as_value(&self) -> Value<'_> {
        match self {
            Status::Pending => Value::from("pending"),
            Status::Done => Value::from("done"),
        }
    }
}

#[derive(Debug, Clone, Queryable)]
struct Task<'a, T: AsValue> {
    title: &'a str,
    status: Status,
    payload: T,
}

fn address(city: &str) -> Address {
    Address {
        street: "1 Main St".into(),
        city: city.into(),
        zip: None,
    }
}

fn person() -> Person {
    Person {
        name: "Crystal Brown".into(),
        birth_date: NaiveDate::from_ymd_opt(1949, 6, 5).unwrap(),
        address: address("Lake Rhonda"),
        office: address("Andersonfurt"),
        tags: vec!["admin".into(), "ops".into()],
        score: 4.5,
        active: true,
        last_login: NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0),
        password_hash: "x".into(),
    }
}

#[test]
fn test_plain_fields() {
    let p = person();
    assert_eq!(p.field("name"), Some(Value::from("Crystal Brown")));
    assert_eq!(p.field("score"), Some(Value::from(4.5)));
    assert_eq!(p.field("active"), Some(Value::from(true)));
    assert_eq!(p.field("tags"), Some(Value::from(vec!["admin", "ops"])));
}

#[test]
fn test_rename_and_skip() {
    let p = person();
    assert!(p.field("birth_date").is_none());
    assert_eq!(lookup(&p, "born__year").unwrap(), Value::from(1949));
    assert!(p.field("password_hash").is_none());
    assert_eq!(p.password_hash, "x");
    assert!(p.field("office").is_none());
}

#[test]
fn test_field_constants() {
    assert_eq!(Person::NAME, "name");
    assert_eq!(Person::BORN, "born");
    assert_eq!(Person::ADDRESS, "address");
    assert_eq!(Person::WORK, "work");
    assert_eq!(Person::LAST_LOGIN, "last_login");
    assert_eq!(Address::ZIP, "zip");
}

#[test]
fn test_nested_paths() {
    let p = person();
    assert_eq!(lookup(&p, "address__city").unwrap(), Value::from("Lake Rhonda"));
    assert_eq!(lookup(&p, "work__city").unwrap(), Value::from("Andersonfurt"));
    assert!(lookup(&p, "address__zip").unwrap().is_none());
    assert!(matches!(
        lookup(&p, "address__country"),
        Err(QueryError::Lookup { ref segment, .. }) if segment == "country"
    ));
    assert!(matches!(
        lookup(&p, "name__city"),
        Err(QueryError::Lookup { .. })
    ));
}

#[test]
fn test_optional_datetime() {
    let p = person();
    assert_eq!(lookup(&p, "last_login__hour").unwrap(), Value::from(9));
    assert_eq!(lookup(&p, "last_login__date__month").unwrap(), Value::from(3));

    let mut never = person();
    never.last_login = None;
    assert!(lookup(&never, "last_login").unwrap().is_none());
    assert!(lookup(&never, "last_login__hour").is_err());
}

#[test]
fn test_generic_struct_with_custom_value() {
    let task = Task {
        title: "write docs",
        status: Status::Pending,
        payload: 3u8,
    };
    assert_eq!(task.field("title"), Some(Value::from("write docs")));
    assert_eq!(task.field("status"), Some(Value::from("pending")));
    assert_eq!(task.field("payload"), Some(Value::from(3)));
}

#[test]
fn test_derived_structs_in_container() {
    let mut other = person();
    other.name = "Carol Roy".into();
    other.address = address("Pattonstad");
    other.tags = vec!["staff".into()];
    let people: ListContainer<Person> = vec![person(), other].into();

    let admins = people.filter(&q!(tags__in = "admin").unwrap()).unwrap();
    assert_eq!(admins.len(), 1);
    assert_eq!(admins[0].name, "Crystal Brown");

    let by_city = people.order_by([Person::ADDRESS.to_string() + "__city"]).unwrap();
    assert_eq!(by_city[0].name, "Crystal Brown");

    let tasks: ListContainer<Task<'_, f64>> = vec![
        Task { title: "b", status: Status::Done, payload: 2.0 },
        Task { title: "a", status: Status::Pending, payload: 1.0 },
    ]
    .into_iter()
    .collect();
    let done = tasks.filter(&q!(status = "done").unwrap()).unwrap();
    assert_eq!(done.len(), 1);
    assert_eq!(done[0].status, Status::Done);
}
