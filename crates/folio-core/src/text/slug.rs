/// Tabla de sustituciones para slugs, aplicada en este orden sobre el texto
/// ya en minúsculas.
///
/// Ninguna regla elimina guiones, así que los introducidos por las primeras
/// entradas sobreviven al resto de la tabla.
pub const SLUG_REPLACE: &[(&str, &str)] = &[
  (" ", "-"),
  (":", "-"),
  ("/", "-"),
  (".", "-"),
  (",", ""),
  ("(", ""),
  (")", ""),
  ("á", "a"),
  ("ä", "ae"),
  ("æ", "ae"),
  ("í", "i"),
  ("ö", "oe"),
  ("œ", "oe"),
  ("ß", "ss"),
  ("š", "s"),
  ("ü", "ue"),
  ("ů", "u"),
  ("ý", "y"),
];

/// Genera un identificador apto para URLs.
///
/// Los caracteres que no aparecen en [`SLUG_REPLACE`] se conservan tal cual,
/// incluidos los no ASCII (p. ej. `é` o `č`).
pub fn slugify(s: &str) -> String {
  let mut slug = s.to_lowercase();
  for (from, to) in SLUG_REPLACE {
    slug = slug.replace(from, to);
  }
  slug
}
