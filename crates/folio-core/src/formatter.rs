//! Normalización de un registro crudo a [`NormalizedRecord`].

use crate::domain::{
  AssetLayout, AssetLink, Composer, License, NormalizedRecord, RawComposer, RawRecord, Release, SourcedRecord,
};
use crate::errors::FormatError;
use crate::text::{MIDI_BUNDLE, format_part_name, markup_to_text, slugify};

/// Marcador de salto de línea en los subtítulos.
pub const LINE_BREAK: &str = "<br/>";

/// Texto de "releases anteriores" cuando sólo existe la última.
pub const NO_OLDER_RELEASES: &str = "(none)";

const FULL_SCORE: &str = "full_score";

/// Datos de la organización necesarios para construir enlaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatContext {
  /// Organización de GitHub que aloja los repositorios.
  pub org: String,
  /// URL base de las partituras publicadas por el sitio.
  pub hosted_base_url: String,
}

impl FormatContext {
  pub fn new(org: impl Into<String>, hosted_base_url: impl Into<String>) -> Self {
    let hosted_base_url: String = hosted_base_url.into();
    Self { org: org.into(), hosted_base_url: hosted_base_url.trim_end_matches('/').to_string() }
  }
}

/// Normaliza un registro. Función pura: no hace I/O ni modifica la entrada.
pub fn format_record(item: &SourcedRecord, ctx: &FormatContext) -> Result<NormalizedRecord, FormatError> {
  let raw = &item.record;

  let composer = match &raw.composer {
    Some(composer) => composer_key(composer)?,
    None => Composer::unknown(),
  };

  let id = derive_id(raw)?;
  let title = markup_to_text(required(&raw.title, "title")?);
  let scoring = markup_to_text(required(&raw.scoring, "scoring")?);

  let license_code = required(&raw.license, "license")?;
  let license: License =
    license_code.parse().map_err(|_| FormatError::UnknownLicense(license_code.to_string()))?;

  let (latest_release, old_releases) = match &raw.releases {
    Some(releases) => {
      let (latest, older) = format_releases(releases, raw.repo.as_deref(), ctx)?;
      (Some(latest), Some(older))
    }
    None => (None, None),
  };

  let (assets, midi_link) = format_assets(raw, &item.layout, ctx)?;

  Ok(NormalizedRecord {
    origin: item.origin.clone(),
    composer,
    id_slug: slugify(&id),
    subtitle: compose_subtitle(raw.subtitle.as_deref(), &id),
    id,
    title,
    scoring,
    genre: raw.genre.clone().unwrap_or_default(),
    festival: raw.festival.clone(),
    license,
    imslp: raw.imslp.clone().unwrap_or_default(),
    latest_release,
    old_releases,
    assets,
    midi_link,
    asin: raw.asin.clone(),
  })
}

/// Clave del compositor; `first` y `suffix` ausentes valen cadena vacía.
pub fn composer_key(raw: &RawComposer) -> Result<Composer, FormatError> {
  let last = raw
    .last
    .as_deref()
    .filter(|s| !s.trim().is_empty())
    .ok_or_else(|| FormatError::MalformedRecord("composer.last".into()))?;

  Ok(Composer::new(
    raw.first.clone().unwrap_or_default(),
    last,
    raw.suffix.clone().unwrap_or_default(),
  ))
}

/// ID explícito, o `(siglum shelfmark)` de la primera fuente principal.
pub fn derive_id(raw: &RawRecord) -> Result<String, FormatError> {
  if let Some(id) = raw.id.as_deref().filter(|id| !id.trim().is_empty()) {
    return Ok(id.to_string());
  }

  let sources = raw.sources.as_ref().ok_or(FormatError::MissingIdentifier)?;
  let (key, principal) =
    sources.iter().find(|(_, source)| source.principal).ok_or(FormatError::MissingIdentifier)?;

  let siglum = principal
    .siglum
    .as_deref()
    .ok_or_else(|| FormatError::MalformedRecord(format!("sources.{key}.siglum")))?;
  let shelfmark = principal
    .shelfmark
    .as_deref()
    .ok_or_else(|| FormatError::MalformedRecord(format!("sources.{key}.shelfmark")))?;

  Ok(format!("({siglum} {shelfmark})"))
}

/// Sin subtítulo explícito el subtítulo es el ID; si lo hay, `subtítulo<br/>ID`.
pub fn compose_subtitle(subtitle: Option<&str>, id: &str) -> String {
  let subtitle = match subtitle {
    Some(subtitle) => format!("{subtitle}{LINE_BREAK}{id}"),
    None => id.to_string(),
  };
  subtitle.replace("\\\\", " ")
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str, FormatError> {
  field.as_deref().filter(|s| !s.trim().is_empty()).ok_or_else(|| FormatError::MalformedRecord(name.to_string()))
}

fn release_link(release: &Release, repo: &str, ctx: &FormatContext) -> String {
  format!(
    "[{version}](https://github.com/{org}/{repo}/releases/tag/{version})&nbsp;({date})",
    version = release.version,
    org = ctx.org,
    date = release.date,
  )
}

/// La primera release es la última; el resto se une con comas.
fn format_releases(
  releases: &[Release],
  repo: Option<&str>,
  ctx: &FormatContext,
) -> Result<(String, String), FormatError> {
  let (latest, older) =
    releases.split_first().ok_or_else(|| FormatError::MalformedRecord("releases (empty)".into()))?;
  let repo = repo.ok_or_else(|| FormatError::MalformedRecord("repo".into()))?;

  let older = if older.is_empty() {
    NO_OLDER_RELEASES.to_string()
  } else {
    older.iter().map(|r| release_link(r, repo, ctx)).collect::<Vec<_>>().join(", ")
  };

  Ok((release_link(latest, repo, ctx), older))
}

fn asset_link(part_name: &str, url: &str, file_stem: &str) -> String {
  let class = if file_stem == FULL_SCORE { ".full-score" } else { "" };
  format!("[{part_name}]({url}){{: .asset-link{class}}}")
}

fn format_assets(
  raw: &RawRecord,
  layout: &AssetLayout,
  ctx: &FormatContext,
) -> Result<(Vec<AssetLink>, Option<String>), FormatError> {
  let Some(files) = raw.assets.as_ref().filter(|files| !files.is_empty()) else {
    return Ok((Vec::new(), None));
  };

  let mut assets = Vec::with_capacity(files.len());
  let mut midi_link = None;

  match layout {
    AssetLayout::Release => {
      let latest = raw
        .releases
        .as_ref()
        .and_then(|r| r.first())
        .ok_or_else(|| FormatError::MalformedRecord("releases".into()))?;
      let repo = raw.repo.as_deref().ok_or_else(|| FormatError::MalformedRecord("repo".into()))?;

      for file in files {
        let part_name = format_part_name(file, ".pdf");
        let url = format!("https://github.com/{}/{repo}/releases/download/{}/{file}", ctx.org, latest.version);

        if file == MIDI_BUNDLE {
          midi_link = Some(format!("[{part_name}]({url})"));
          continue;
        }

        let stem = file.strip_suffix(".pdf").unwrap_or(file);
        assets.push(AssetLink { link: asset_link(&part_name, &url, stem), part_name });
      }
    }
    AssetLayout::Hosted { collection, work } => {
      for file in files {
        let part_name = format_part_name(file, ".ly");
        let stem = file.strip_suffix(".ly").unwrap_or(file);
        let url = format!("{}/{collection}/{work}/{stem}.pdf", ctx.hosted_base_url);
        assets.push(AssetLink { link: asset_link(&part_name, &url, stem), part_name });
      }
    }
  }

  Ok((assets, midi_link))
}
