//! Crate `correlation` — contrato con el motor de procesos y patrón de
//! correlación de mensajes
//!
//! Este crate define el contrato `ProcessEngine` (las tres operaciones que
//! ofrece el motor externo: consultar suscripciones, consultar variables y
//! correlacionar un mensaje), el orquestador `MessageCorrelator` que
//! implementa la comprobación de cardinalidad previa a la correlación, una
//! capa `CorrelationService` de alto nivel y un doble en memoria útil para
//! pruebas (`InMemoryProcessEngine`).
//!
//! Diseño resumido:
//! - El motor es una caja negra: aquí no se ejecutan procesos ni se
//!   persiste nada; todo estado autoritativo vive del lado del motor.
//! - Antes de correlacionar se consulta la cardinalidad de receptores para
//!   no disparar el error de correlación no única del motor.
//! - Con más de un receptor, una clave de correlación candidata restringe
//!   la búsqueda a las instancias suscritas; sólo con exactamente una
//!   coincidencia se entrega el mensaje.
//!
//! Ejemplo rápido:
//! ```rust
//! use correlation::correlator::CorrelatorConfig;
//! use correlation::stubs::InMemoryProcessEngine;
//! use std::sync::Arc;
//! let engine = Arc::new(InMemoryProcessEngine::new());
//! let correlator = correlation::MessageCorrelator::new(engine, CorrelatorConfig {});
//! ```
pub mod correlator;
pub mod engine;
pub mod errors;
pub mod service;
pub mod stubs;

pub use correlator::*;
pub use engine::*;
pub use errors::*;
pub use service::*;
pub use stubs::*;
