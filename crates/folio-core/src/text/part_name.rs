use once_cell::sync::Lazy;
use regex::Regex;

/// Marcador de espacio no separable usado en las páginas generadas.
pub const NBSP: &str = "&nbsp;";

/// Archivo de release que agrupa todos los MIDI de una obra.
pub const MIDI_BUNDLE: &str = "midi_collection.zip";

/// Texto visible para [`MIDI_BUNDLE`].
pub const MIDI_LABEL: &str = "MIDI";

/// Nombres de instrumentos con forma de presentación fija.
///
/// Se comparan contra el nombre completo sin sufijo numérico: `cord12` usa la
/// entrada `cord` y conserva el `12` para las reglas numéricas.
const PART_NAMES: &[(&str, &str)] = &[
  ("bc_realized", "bc (realizzato)"),
  ("cemb_realized", "cemb (realizzato)"),
  ("cord", "cor (D)"),
  ("corf", "cor (F)"),
  ("full_score", "full score"),
  ("oba", "ob d'amore"),
  ("obdc", "ob da caccia"),
  ("org_realized", "org (realizzato)"),
  ("pf_red", "pf (riduzione)"),
];

/// `coro_DE` -> `coro (DE)`.
static CHOIR_GROUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(coro)_([A-Z]+)$").expect("invalid choir pattern"));

/// Sufijos numéricos; deben ir después de los nombres fijos.
static PART_NUMBERS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
  [(r"([\w\)])123$", "${1} 1, 2, 3"), (r"([\w\)])12$", "${1} 1, 2"), (r"([\w\)])(\d)$", "${1} ${2}")]
    .into_iter()
    .map(|(pattern, replacement)| (Regex::new(pattern).expect("invalid part number pattern"), replacement))
    .collect()
});

static SEPARATORS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[_ ]").expect("invalid separator pattern"));

/// Convierte el nombre de archivo de una parte en su nombre visible.
///
/// ```
/// use folio_core::text::format_part_name;
///
/// assert_eq!(format_part_name("vl12.pdf", ".pdf"), "vl&nbsp;1,&nbsp;2");
/// ```
pub fn format_part_name(filename: &str, extension: &str) -> String {
  if filename == MIDI_BUNDLE {
    return MIDI_LABEL.to_string();
  }

  let stem = filename.strip_suffix(extension).unwrap_or(filename);
  let base = stem.trim_end_matches(|c: char| c.is_ascii_digit());
  let digits = &stem[base.len()..];

  let base = match PART_NAMES.iter().find(|(file, _)| *file == base) {
    Some((_, display)) => display.to_string(),
    None => CHOIR_GROUP.replace(base, "$1 ($2)").into_owned(),
  };
  let mut name = format!("{base}{digits}");

  for (pattern, replacement) in PART_NUMBERS.iter() {
    name = pattern.replace(&name, *replacement).into_owned();
  }

  SEPARATORS.replace_all(&name, NBSP).into_owned()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_full_score() {
    assert_eq!(format_part_name("full_score.pdf", ".pdf"), "full&nbsp;score");
  }

  #[test]
  fn test_numeric_suffixes() {
    assert_eq!(format_part_name("vl1.pdf", ".pdf"), "vl&nbsp;1");
    assert_eq!(format_part_name("vl12.pdf", ".pdf"), "vl&nbsp;1,&nbsp;2");
    assert_eq!(format_part_name("vl123.pdf", ".pdf"), "vl&nbsp;1,&nbsp;2,&nbsp;3");
  }

  #[test]
  fn test_named_parts_keep_their_numbers() {
    assert_eq!(format_part_name("cord12.pdf", ".pdf"), "cor&nbsp;(D)&nbsp;1,&nbsp;2");
    assert_eq!(format_part_name("oba1.pdf", ".pdf"), "ob&nbsp;d'amore&nbsp;1");
    assert_eq!(format_part_name("org_realized.ly", ".ly"), "org&nbsp;(realizzato)");
  }

  #[test]
  fn test_names_are_not_rewritten_inside_other_words() {
    assert_eq!(format_part_name("record.pdf", ".pdf"), "record");
    assert_eq!(format_part_name("tboba.pdf", ".pdf"), "tboba");
  }

  #[test]
  fn test_choir_groups() {
    assert_eq!(format_part_name("coro_DE.pdf", ".pdf"), "coro&nbsp;(DE)");
    assert_eq!(format_part_name("coro.pdf", ".pdf"), "coro");
    assert_eq!(format_part_name("coro_DE1.pdf", ".pdf"), "coro&nbsp;(DE)&nbsp;1");
    assert_eq!(format_part_name("coro_DK12.pdf", ".pdf"), "coro&nbsp;(DK)&nbsp;1,&nbsp;2");
  }

  #[test]
  fn test_midi_bundle() {
    assert_eq!(format_part_name(MIDI_BUNDLE, ".pdf"), MIDI_LABEL);
  }

  #[test]
  fn test_other_extension_is_kept() {
    assert_eq!(format_part_name("vl1.ly", ".pdf"), "vl1.ly");
  }
}
