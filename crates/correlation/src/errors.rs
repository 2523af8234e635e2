// Archivo: errors.rs
// Propósito: definir los errores del contrato con el motor, los errores del
// patrón de correlación y el alias Result<T> usado por las APIs del crate.
use thiserror::Error;

/// Errores que puede devolver una implementación de `ProcessEngine`.
///
/// - `Mismatch`: el motor rechazó la correlación por cero o varios receptores.
/// - `NotFound`: entidad no encontrada.
/// - `Connection`: error de transporte al hablar con el motor.
/// - `Protocol`: respuesta del motor no interpretable.
/// - `Other`: cualquier otro error.
#[derive(Error, Debug)]
pub enum EngineError {
  /// El motor exige exactamente un receptor y encontró otra cardinalidad.
  #[error("Correlación no única para '{message}': {candidates} receptores")]
  Mismatch { message: String, candidates: usize },
  /// Entidad no encontrada (por ejemplo, instancia o suscripción).
  #[error("No encontrado: {0}")]
  NotFound(String),
  /// Error de transporte (HTTP, red, etc.).
  #[error("Error de conexión: {0}")]
  Connection(String),
  /// Respuesta del motor fuera de contrato (cuerpo o estado inesperado).
  #[error("Error de protocolo: {0}")]
  Protocol(String),
  /// Otro tipo de error.
  #[error("Otro: {0}")]
  Other(String),
}

/// Alias de resultado usado por las implementaciones de `ProcessEngine`.
pub type Result<T> = std::result::Result<T, EngineError>;

/// Resultados terminales del patrón de correlación.
///
/// Cada rama en la que NO se intenta correlacionar queda representada por
/// una variante propia, de modo que el llamador pueda distinguir "no hay
/// receptor" de "hay varios y falta desambiguar".
#[derive(Error, Debug)]
pub enum CorrelationError {
  /// Errores devueltos por el motor (consultas o correlación).
  #[error("Error del motor: {0}")]
  Engine(#[from] EngineError),

  /// Errores de validación del dominio (nombres vacíos, etc.).
  #[error("Error de dominio: {0}")]
  Domain(#[from] bpm_domain::DomainError),

  /// Ninguna suscripción activa para el mensaje; no se intenta correlacionar.
  #[error("Sin suscripción activa para el mensaje '{0}'")]
  NoSubscription(String),

  /// Varias suscripciones y ninguna clave candidata con la que desambiguar.
  #[error("Mensaje '{message}' con {candidates} suscripciones activas y sin clave de correlación")]
  AmbiguousSubscription { message: String, candidates: usize },

  /// La clave candidata no aparece en ninguna instancia suscrita.
  #[error("La clave '{key}' no identifica ninguna instancia candidata")]
  NoInstanceForKey { key: String },

  /// La clave candidata aparece en varias instancias suscritas.
  #[error("La clave '{key}' identifica {candidates} instancias; se esperaba exactamente una")]
  AmbiguousKey { key: String, candidates: usize },
}
