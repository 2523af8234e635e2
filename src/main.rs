use bpm_domain::{EventSubscriptionQuery, EventType};
use correlation::{CorrelationService, CorrelatorConfig, InMemoryProcessEngine, ProcessEngine};
use std::error::Error;
use std::io::{self, Write};
use std::sync::Arc;
use uuid::Uuid;

/// Pequeño menú interactivo para ejercitar el patrón de correlación contra
/// un motor de procesos.
///
/// Sin configuración se usa el motor en memoria (sembrable desde el propio
/// menú); si `ENGINE_REST_URL` está definido se habla con un motor real por
/// REST y el menú se reduce a las operaciones de lectura y entrega.
///
/// Opciones soportadas (modo en memoria):
/// 1) Ver suscripciones activas
/// 2) Crear instancia en espera (suscripción a mensaje)
/// 3) Definir variable de proceso (clave de correlación)
/// 4) Correlacionar mensaje
/// 5) Salir
fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();
    if std::env::var("ENGINE_REST_URL").is_ok() {
        let engine = Arc::new(bpm_rest::new_from_env().map_err(|e| Box::new(e) as Box<dyn Error>)?);
        run_remote(engine)
    } else {
        run_local(Arc::new(InMemoryProcessEngine::new()))
    }
}

fn run_local(engine: Arc<InMemoryProcessEngine>) -> Result<(), Box<dyn Error>> {
    let service = CorrelationService::new(engine.clone(), CorrelatorConfig {});

    loop {
        println!("\n== Correlación CLI (motor en memoria) ==");
        println!("1) Ver suscripciones activas");
        println!("2) Crear instancia en espera (suscripción a mensaje)");
        println!("3) Definir variable de proceso (clave de correlación)");
        println!("4) Correlacionar mensaje");
        println!("5) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => list_subscriptions(&service),
            "2" => {
                let name = prompt("Nombre del mensaje a esperar: ")?;
                match engine.start_waiting_instance(name.trim()) {
                    Ok(id) => println!("Instancia en espera creada: {}", id),
                    Err(e) => eprintln!("Error creando la instancia: {}", e),
                }
            }
            "3" => {
                let pid_s = prompt("Instancia de proceso (UUID): ")?;
                let pid = match Uuid::parse_str(pid_s.trim()) {
                    Ok(u) => u,
                    Err(_) => { eprintln!("UUID inválido"); continue; }
                };
                let name = prompt("Nombre de la variable: ")?;
                let value_s = prompt("Valor (JSON o texto simple): ")?;
                let value = serde_json::from_str(&value_s).unwrap_or(serde_json::json!(value_s.trim()));
                match engine.set_variable(pid, name.trim(), value) {
                    Ok(_) => println!("Variable definida en {}", pid),
                    Err(e) => eprintln!("Error definiendo la variable: {}", e),
                }
            }
            "4" => deliver_message(&service)?,
            "5" => {
                println!("Saliendo...");
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
            }
        }
    }

    Ok(())
}

fn run_remote(engine: Arc<bpm_rest::RestProcessEngine>) -> Result<(), Box<dyn Error>> {
    let service = CorrelationService::new(engine, CorrelatorConfig {});

    loop {
        println!("\n== Correlación CLI (motor remoto) ==");
        println!("1) Ver suscripciones activas");
        println!("2) Correlacionar mensaje");
        println!("3) Salir");
        print!("Elige una opción: ");
        io::stdout().flush().ok();

        let mut choice = String::new();
        io::stdin().read_line(&mut choice)?;
        match choice.trim() {
            "1" => list_subscriptions(&service),
            "2" => deliver_message(&service)?,
            "3" => {
                println!("Saliendo...");
                break;
            }
            other => {
                println!("Opción inválida: {}", other);
            }
        }
    }

    Ok(())
}

/// Lista las suscripciones de mensaje activas en forma de tabla.
fn list_subscriptions<E: ProcessEngine + 'static>(service: &CorrelationService<E>) {
    let query = EventSubscriptionQuery::new().event_type(EventType::Message);
    match service.active_subscriptions(&query) {
        Ok(subs) if subs.is_empty() => println!("No hay suscripciones activas"),
        Ok(subs) => {
            println!("\nMENSAJE              | INSTANCIA                            | CREADA");
            println!("--------------------------------------------------------------------------------");
            for s in subs {
                println!("{:<20} | {} | {}", s.event_name(), s.process_instance_id(), s.created_at());
            }
        }
        Err(e) => eprintln!("Error listando suscripciones: {}", e),
    }
}

/// Pide mensaje y clave candidata y entrega aplicando la comprobación de
/// cardinalidad. La clave sólo se usa si hay varias suscripciones.
fn deliver_message<E: ProcessEngine + 'static>(service: &CorrelationService<E>) -> io::Result<()> {
    let message = prompt("Nombre del mensaje: ")?;
    let key_name = prompt("Clave de correlación (enter para ninguna): ")?;
    let candidate = if key_name.trim().is_empty() {
        None
    } else {
        let value_s = prompt("Valor de la clave (JSON o texto simple): ")?;
        let value = serde_json::from_str(&value_s).unwrap_or(serde_json::json!(value_s.trim()));
        Some((key_name.trim().to_string(), value))
    };

    match service.deliver(message.trim(), candidate.as_ref().map(|(k, v)| (k.as_str(), v.clone()))) {
        Ok(result) => println!("Mensaje entregado a la instancia {} ({})",
                               result.process_instance_id, result.correlated_at),
        Err(e) => eprintln!("No se entregó el mensaje: {}", e),
    }
    Ok(())
}

fn prompt(msg: &str) -> io::Result<String> {
    print!("{}", msg);
    io::stdout().flush()?;
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s)
}
