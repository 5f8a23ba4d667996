//! # Static File Server
//! src/lib.rs
//!
//! Servidor de archivos estáticos sobre TCP implementado desde cero para
//! demostrar conceptos de sistemas operativos: concurrencia, secciones
//! críticas y la anatomía exacta de una condición de carrera (lost update)
//! sobre estado compartido.
//!
//! ## Arquitectura
//!
//! El servidor está dividido en módulos especializados:
//! - `http`: Parsing del request y serialización de la respuesta
//! - `resolver`: Traducción segura de rutas URL a rutas del filesystem
//! - `content`: Decisión de contenido (archivos, listados, página de contadores)
//! - `counters`: Contadores compartidos por ruta, con y sin sección crítica
//! - `server`: Accept loop TCP en modo sequential o threaded
//! - `config`: Configuración por CLI y variables de entorno
//!
//! ## Ejemplo de uso
//!
//! ```no_run
//! use static_server::config::Config;
//! use static_server::server::Server;
//!
//! let config = Config::default();
//! let mut server = Server::new(config).expect("docroot inválido");
//! server.run().expect("Error al iniciar servidor");
//! ```

pub mod config;
pub mod content;
pub mod counters;
pub mod http;
pub mod resolver;
pub mod server;
