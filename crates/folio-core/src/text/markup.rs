use once_cell::sync::Lazy;
use regex::Regex;

/// Reglas de conversión de marcado, en orden de aplicación.
///
/// El orden importa: los saltos de línea (`\newline` y `\\`) se resuelven
/// antes que el escape genérico `\ `, que si no se comería la barra primero.
static MARKUP_RULES: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
  [
    (r"\s*\\newline\b\s*", " "),
    (r"\s*\\\\\s*", " "),
    (r"\\flat\s+([A-Ha-h])", "${1}♭"),
    (r"\\sharp\s+([A-Ha-h])", "${1}♯"),
    (r"\\\s", " "),
  ]
  .into_iter()
  .map(|(pattern, replacement)| (Regex::new(pattern).expect("invalid markup pattern"), replacement))
  .collect()
});

/// Convierte los comandos LaTeX habituales en títulos y plantillas a texto.
///
/// - `\newline` y `\\` pasan a ser un espacio (absorbiendo el espacio de alrededor).
/// - `\flat B` pasa a `B♭`, `\sharp F` a `F♯`.
/// - `\ ` (espacio escapado) pasa a un espacio simple.
///
/// Cualquier otro texto se deja intacto.
pub fn markup_to_text(s: &str) -> String {
  let mut text = s.to_string();
  for (pattern, replacement) in MARKUP_RULES.iter() {
    text = pattern.replace_all(&text, *replacement).into_owned();
  }
  text
}
