//! # Sistema de Contadores
//! src/counters/mod.rs
//!
//! Contadores de requests por ruta compartidos entre handlers. El store es
//! un valor explícito que el servidor posee y clona hacia cada conexión:
//! dos servidores en el mismo proceso (como en los tests) nunca se
//! contaminan entre sí.

pub mod store;

pub use store::{CounterStore, IncrementStrategy};
