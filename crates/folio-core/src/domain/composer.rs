use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::text::slugify;

/// Identidad de un compositor: clave de agrupación del catálogo.
///
/// La igualdad compara los tres campos; el orden es `(last, suffix, first)`,
/// que es el orden del índice de compositores.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Composer {
  pub first: String,
  pub last: String,
  /// Sufijo de desambiguación (p. ej. `"d. J."`); vacío si no hay.
  pub suffix: String,
}

impl Composer {
  /// Apellido reservado para obras anónimas: se muestra sin nombre de pila.
  pub const ANONYMOUS: &'static str = "Anonymus";

  /// Apellido usado cuando un registro no trae bloque `composer`.
  pub const UNKNOWN: &'static str = "(unknown)";

  pub fn new(first: impl Into<String>, last: impl Into<String>, suffix: impl Into<String>) -> Self {
    Self { first: first.into(), last: last.into(), suffix: suffix.into() }
  }

  pub fn anonymous() -> Self {
    Self::new("", Self::ANONYMOUS, "")
  }

  pub fn unknown() -> Self {
    Self::new("", Self::UNKNOWN, "")
  }

  pub fn is_anonymous(&self) -> bool {
    self.last == Self::ANONYMOUS
  }

  /// Título de la página del compositor: `Apellido [Sufijo], Nombre`.
  pub fn display_title(&self) -> String {
    if self.is_anonymous() {
      self.last.clone()
    } else if self.suffix.is_empty() {
      format!("{}, {}", self.last, self.first)
    } else {
      format!("{} {}, {}", self.last, self.suffix, self.first)
    }
  }

  /// Slug de la página: `nombre-apellido[-sufijo]`.
  pub fn slug(&self) -> String {
    let raw = if self.is_anonymous() {
      self.last.clone()
    } else if self.suffix.is_empty() {
      format!("{}-{}", self.first, self.last)
    } else {
      format!("{}-{}-{}", self.first, self.last, self.suffix)
    };
    slugify(&raw)
  }

  /// Inicial del apellido, usada para agrupar la navegación.
  pub fn initial(&self) -> String {
    self.last.chars().next().map(String::from).unwrap_or_default()
  }
}

impl Ord for Composer {
  fn cmp(&self, other: &Self) -> Ordering {
    self
      .last
      .cmp(&other.last)
      .then_with(|| self.suffix.cmp(&other.suffix))
      .then_with(|| self.first.cmp(&other.first))
  }
}

impl PartialOrd for Composer {
  fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
    Some(self.cmp(other))
  }
}

impl fmt::Display for Composer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.display_title())
  }
}
