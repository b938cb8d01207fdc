//! Test utilities for sheet export parser testing
//!
//! This module provides fixture sheets shared by the parser test modules.

// Test modules
mod parser_tests;
mod stats_tests;

/// Helper to create a small results sheet export
pub fn create_test_results_sheet() -> String {
    r#"id evento,nombre,categoria,dorsal,tiempo,Distancia,posición categoria,club
E1,Ana Pérez,Libre Femenino,101,0:45:10,10,1,Trotadores
E1,Luis Gómez,Libre Masculino,102,0:41:02,10,1,Club Andes
E1,Marta Ruiz,Libre Femenino,103,0:47:55,10,2,
E2,Pedro Díaz,Master A,201,1:10:00,21,1,Runners
"#
    .to_string()
}

/// Helper to create a sheet export whose rows do not all fit the header
pub fn create_ragged_sheet() -> String {
    "a,b,c\n1,2,3\n4\n5,6,7,8\n".to_string()
}
