use std::fmt;

use serde::de::{Deserializer, MapAccess, Visitor};
use serde::{Deserialize, Serialize};

/// Registro de una obra tal como llega de `metadata.yaml`, más los campos que
/// añade la fuente (repositorio, releases, assets, ASIN).
///
/// Todos los campos son opcionales aquí; el formateador decide cuáles son
/// obligatorios.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawRecord {
  #[serde(default)]
  pub composer: Option<RawComposer>,
  #[serde(default)]
  pub title: Option<String>,
  #[serde(default)]
  pub subtitle: Option<String>,
  #[serde(default)]
  pub scoring: Option<String>,
  #[serde(default)]
  pub genre: Option<String>,
  #[serde(default)]
  pub festival: Option<String>,
  #[serde(default)]
  pub license: Option<String>,
  #[serde(default, deserialize_with = "deserialize_opt_text")]
  pub id: Option<String>,
  #[serde(default)]
  pub sources: Option<Sources>,
  #[serde(default, deserialize_with = "deserialize_opt_text")]
  pub imslp: Option<String>,

  // --- Campos añadidos por la fuente ---
  /// Nombre del repositorio de la obra (necesario para los enlaces de release).
  #[serde(default)]
  pub repo: Option<String>,
  /// Releases, la primera es la última publicada.
  #[serde(default)]
  pub releases: Option<Vec<Release>>,
  /// Archivos adjuntos a la última release (o partituras de una colección).
  #[serde(default)]
  pub assets: Option<Vec<String>>,
  #[serde(default, deserialize_with = "deserialize_opt_text")]
  pub asin: Option<String>,
}

/// Bloque `composer` de un registro. Campos desconocidos son un error para
/// que una errata no produzca un nombre vacío en silencio.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawComposer {
  #[serde(default)]
  pub first: Option<String>,
  #[serde(default)]
  pub last: Option<String>,
  #[serde(default)]
  pub suffix: Option<String>,
}

/// Fuente manuscrita de una obra.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawSource {
  #[serde(default, deserialize_with = "deserialize_opt_text")]
  pub siglum: Option<String>,
  #[serde(default, deserialize_with = "deserialize_opt_text")]
  pub shelfmark: Option<String>,
  #[serde(default)]
  pub principal: bool,
}

/// Release publicada de una obra.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
  pub version: String,
  /// Fecha ISO (`YYYY-MM-DD`); no se reordena por fecha.
  pub date: String,
}

impl Release {
  pub fn new(version: impl Into<String>, date: impl Into<String>) -> Self {
    Self { version: version.into(), date: date.into() }
  }
}

/// Mapa ordenado de fuentes. El orden del documento se conserva porque la
/// primera fuente principal determina el ID de la obra.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sources(Vec<(String, RawSource)>);

impl Sources {
  pub fn iter(&self) -> impl Iterator<Item = (&str, &RawSource)> {
    self.0.iter().map(|(key, source)| (key.as_str(), source))
  }
}

impl<'de> Deserialize<'de> for Sources {
  fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
    struct SourcesVisitor;

    impl<'de> Visitor<'de> for SourcesVisitor {
      type Value = Sources;

      fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of sources")
      }

      fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Sources, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, source)) = map.next_entry::<Scalar, RawSource>()? {
          entries.push((key.into_text(), source));
        }
        Ok(Sources(entries))
      }
    }

    deserializer.deserialize_map(SourcesVisitor)
  }
}

/// Escalar YAML que se usa como texto: `shelfmark: 123` y `shelfmark: "123"`
/// deben dar lo mismo.
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
  Text(String),
  Integer(i64),
  Float(f64),
  Bool(bool),
}

impl Scalar {
  fn into_text(self) -> String {
    match self {
      Scalar::Text(s) => s,
      Scalar::Integer(n) => n.to_string(),
      Scalar::Float(x) => x.to_string(),
      Scalar::Bool(b) => b.to_string(),
    }
  }
}

/// Deserializa un escalar opcional (texto o número) como `Option<String>`.
pub fn deserialize_opt_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
  let value = Option::<Scalar>::deserialize(deserializer)?;
  Ok(value.map(Scalar::into_text))
}

/// Cómo se enlazan los assets de un registro.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetLayout {
  /// Adjuntos de la última release del repositorio de la obra (`.pdf`).
  Release,
  /// Partituras de una colección, publicadas en el sitio como PDF a partir
  /// de los fuentes `.ly`.
  Hosted { collection: String, work: String },
}

/// Registro crudo junto con su procedencia.
#[derive(Debug, Clone, PartialEq)]
pub struct SourcedRecord {
  /// Repositorio (`haydn-m-missa`) u obra de colección (`coleccion/obra`).
  pub origin: String,
  pub record: RawRecord,
  pub layout: AssetLayout,
}

impl SourcedRecord {
  pub fn new(origin: impl Into<String>, record: RawRecord, layout: AssetLayout) -> Self {
    Self { origin: origin.into(), record, layout }
  }
}
