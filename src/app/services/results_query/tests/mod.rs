//! Shared fixtures for results query tests

use crate::app::models::{Event, Record};
use crate::app::services::tabular_parser::parse;

mod links_tests;
mod records_tests;

/// Results of two events; event E1 has a DNF and a record without category
pub fn create_test_results() -> Vec<Record> {
    parse(
        r#"id evento,nombre,categoria,dorsal,tiempo,Distancia,posición categoria
E1,Ana Pérez,Libre Femenino,101,0:45:10,10,2
E1,Luis Gómez,Libre Masculino,102,0:41:02,10,1
E1,Marta Ruiz,Libre Femenino,103,0:47:55,10,DNF
E1,Sofía Lara,Libre Femenino,104,0:44:00,10,1
E2,Pedro Díaz,Master A,201,1:10:00,21,1
E1,Invitado,,999,0:50:00,10,
E1,Carla Ana Méndez,Libre Femenino,105,0:46:30,10,3
"#,
    )
}

/// Build a record holding only a category rank
pub fn ranked(rank: &str, name: &str) -> Record {
    Record::from_pairs([("posición categoria", rank), ("nombre", name)])
}

/// Build an event with the given id, name, date and sport
pub fn create_test_event(id: &str, name: &str, date: &str, sport: &str) -> Event {
    Event {
        id: id.to_string(),
        name: name.to_string(),
        date: date.to_string(),
        sport: sport.to_string(),
        logo: None,
    }
}

/// A small event listing in sheet order
pub fn create_test_events() -> Vec<Event> {
    vec![
        create_test_event("E1", "10K San Celestino", "12 mayo 2024", "running"),
        create_test_event("E2", "Gran Fondo Andino", "3/2/2023", "ciclismo"),
        create_test_event("E3", "Media Maratón Mérida", "fecha por confirmar", "running"),
        create_test_event("E4", "Duatlón Nocturno", "20/7/2024", "duatlon"),
        create_test_event("E5", "5K Familiar", "otra fecha", "running"),
    ]
}
