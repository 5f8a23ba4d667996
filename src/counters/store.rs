//! # Store de Contadores por Ruta
//! src/counters/store.rs
//!
//! Mapa compartido de ruta decodificada → cantidad de requests servidos.
//! Existe un store por instancia de servidor y todos los handlers
//! concurrentes comparten el mismo handle.
//!
//! El incremento tiene dos estrategias elegidas al construir el store:
//!
//! - **Locked**: leer y escribir dentro de una sola sección crítica. Los
//!   incrementos quedan linealizables: N incrementos sobre una clave
//!   siempre suman exactamente N.
//! - **Racy**: leer el valor, soltar el lock, dormir una ventana fija y
//!   recién entonces escribir el valor leído + 1. Dos handlers que leen el
//!   mismo valor viejo escriben el mismo resultado y un incremento se
//!   pierde. La carrera es el comportamiento buscado (sirve para
//!   demostrar lost updates bajo carga), no un bug a arreglar.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

/// Estrategia de incremento, fijada al crear el store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementStrategy {
    /// Leer y escribir bajo el mismo lock (linealizable)
    Locked,

    /// Leer, dormir `delay` sin el lock, escribir valor viejo + 1.
    /// La ventana es configurable para que los tests puedan agrandarla.
    Racy { delay: Duration },
}

/// Store de contadores thread-safe (el handle se clona por conexión)
#[derive(Clone)]
pub struct CounterStore {
    inner: Arc<Mutex<HashMap<String, u64>>>,
    strategy: IncrementStrategy,
}

impl CounterStore {
    /// Crea un store vacío con la estrategia indicada
    pub fn new(strategy: IncrementStrategy) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            strategy,
        }
    }

    /// Estrategia con la que se construyó el store
    pub fn strategy(&self) -> IncrementStrategy {
        self.strategy
    }

    /// Registra un request servido para `path`
    ///
    /// Con `Locked` el incremento es indivisible respecto de cualquier otro
    /// incremento sobre cualquier clave. Con `Racy` la secuencia
    /// leer→dormir→escribir deja la ventana abierta a propósito.
    pub fn increment(&self, path: &str) {
        match self.strategy {
            IncrementStrategy::Locked => {
                let mut counts = self.inner.lock().unwrap();
                *counts.entry(path.to_string()).or_insert(0) += 1;
            }
            IncrementStrategy::Racy { delay } => {
                // El lock se toma solo para leer y se suelta antes de dormir
                let stale = {
                    let counts = self.inner.lock().unwrap();
                    counts.get(path).copied().unwrap_or(0)
                };

                thread::sleep(delay);

                let mut counts = self.inner.lock().unwrap();
                counts.insert(path.to_string(), stale + 1);
            }
        }
    }

    /// Cantidad actual de requests servidos para `path` (0 si nunca se pidió)
    pub fn get(&self, path: &str) -> u64 {
        let counts = self.inner.lock().unwrap();
        counts.get(path).copied().unwrap_or(0)
    }

    /// Copia de todos los contadores al momento de la llamada
    ///
    /// La página raíz la usa para mostrar un snapshot consistente mientras
    /// otros handlers siguen incrementando.
    pub fn snapshot(&self) -> HashMap<String, u64> {
        let counts = self.inner.lock().unwrap();
        counts.clone()
    }
}
