use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Licencias con las que se publican las ediciones.
///
/// El conjunto es cerrado: un código desconocido es un error, nunca un valor
/// por defecto.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum License {
  CcBySa4,
  CcByNcSa4,
}

impl License {
  pub const ALL: [License; 2] = [License::CcBySa4, License::CcByNcSa4];

  /// Código tal como aparece en `metadata.yaml`.
  pub fn code(&self) -> &'static str {
    match self {
      License::CcBySa4 => "cc-by-sa-4.0",
      License::CcByNcSa4 => "cc-by-nc-sa-4.0",
    }
  }

  /// Fragmento Markdown (imagen de la licencia) para la tabla de la obra.
  pub fn snippet(&self) -> &'static str {
    match self {
      License::CcBySa4 => "![CC BY-SA 4.0](/assets/images/license_cc-by-sa.svg){:width='120px'}",
      License::CcByNcSa4 => "![CC BY-NC-SA 4.0](/assets/images/license_cc-by-nc-sa.svg){:width='120px'}",
    }
  }
}

impl fmt::Display for License {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.code())
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown license: {input}")]
pub struct LicenseParseError {
  pub input: String,
}

impl FromStr for License {
  type Err = LicenseParseError;

  /// Sólo acepta el código exacto; no hay normalización.
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    License::ALL.into_iter().find(|l| l.code() == s).ok_or_else(|| LicenseParseError { input: s.to_string() })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_known_codes_roundtrip() {
    for license in License::ALL {
      assert_eq!(license.code().parse::<License>(), Ok(license));
    }
  }

  #[test]
  fn test_unknown_code_is_an_error() {
    let err = "cc0".parse::<License>().unwrap_err();
    assert_eq!(err.input, "cc0");
    assert!("CC-BY-SA-4.0".parse::<License>().is_err());
  }
}
