/// Puerto de progreso de una compilación del catálogo.
///
/// La CLI lo implementa con logs; los tests, con un recolector en memoria.
pub trait ProgressReporter {
  fn start(&self, total_records: usize);
  fn on_success(&self, origin: &str);
  fn on_error(&self, origin: &str, error: &str);
  fn finish(&self, accepted: usize, rejected: usize);
}
