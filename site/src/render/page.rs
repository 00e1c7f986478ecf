use folio_core::domain::{Composer, NormalizedRecord};

use super::{page_document, table_row};
use crate::config::PageSettings;

const EMPTY_CELL: &str = "–";

/// Ficha del compositor (`_data/composers/<slug>.yml`), en el orden del archivo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposerDetails(Vec<(String, String)>);

impl ComposerDetails {
  pub fn from_mapping(mapping: &serde_yaml::Mapping) -> Self {
    let rows = mapping.iter().map(|(key, value)| (yaml_text(key), yaml_text(value))).collect();
    Self(rows)
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  fn render(&self) -> String {
    let rows: Vec<String> =
      self.0.iter().map(|(label, value)| format!("|<span class=\"label-col\">{label}</span>|{value}|")).collect();
    format!(
      "<div class=\"composer-details\" markdown=\"1\">\n{}\n{{: class=\"composer-table\"}}\n</div>",
      rows.join("\n")
    )
  }
}

fn yaml_text(value: &serde_yaml::Value) -> String {
  match value {
    serde_yaml::Value::String(s) => s.clone(),
    serde_yaml::Value::Number(n) => n.to_string(),
    serde_yaml::Value::Bool(b) => b.to_string(),
    serde_yaml::Value::Null => String::new(),
    other => serde_yaml::to_string(other).unwrap_or_default().trim().to_string(),
  }
}

pub(crate) fn work_details(work: &NormalizedRecord) -> String {
  let mut rows = vec![
    format!("|<span class=\"label-col\">genre</span>|{}|", work.genre),
    format!("|<span class=\"label-col\">scoring</span>|{}|", work.scoring),
    format!("|<span class=\"label-col\">latest release</span>|{}|", work.latest_release.as_deref().unwrap_or(EMPTY_CELL)),
    format!("|<span class=\"label-col\">GitHub</span>|{}|", work.asset_links()),
  ];

  if let Some(midi) = &work.midi_link {
    rows.push(format!("|<span class=\"label-col\">MIDI</span>|{midi}|"));
  }

  let imslp = if work.imslp.is_empty() {
    EMPTY_CELL.to_string()
  } else {
    format!("[scores and parts](https://imslp.org/wiki/{})", work.imslp)
  };
  rows.push(format!("|<span class=\"label-col\">IMSLP</span>|{imslp}|"));
  rows.push(format!(
    "|<span class=\"label-col\">previous releases</span>|{}|",
    work.old_releases.as_deref().unwrap_or(EMPTY_CELL)
  ));
  rows.push(format!("|<span class=\"label-col\">license</span>|{}|", work.license_snippet()));

  if let Some(asin) = &work.asin {
    rows.push(format!("|<span class=\"label-col\">print edition</span>|[Amazon](https://www.amazon.com/dp/{asin})|"));
  }

  format!(
    "### {title}<br/><span class=\"work-subtitle\">{subtitle}</span>\n{{: #work-{id_slug}}}\n\n{rows}\n{{: class=\"work-table\"}}\n",
    title = work.title,
    subtitle = work.subtitle,
    id_slug = work.id_slug,
    rows = rows.join("\n"),
  )
}

/// Página de un compositor. `works` ya viene ordenado por título.
pub fn render_composer_page(
  composer: &Composer,
  works: &[NormalizedRecord],
  settings: Option<&PageSettings>,
  details: Option<&ComposerDetails>,
) -> String {
  let mut front_matter = format!("title: {}\npermalink: /scores/{}/\n", composer.display_title(), composer.slug());
  if let Some(image) = settings.and_then(|s| s.header_image.as_deref()) {
    front_matter.push_str(&format!("header:\n  image: /assets/images/{image}\n"));
  }

  let page_intro = settings.and_then(|s| s.page_intro.as_deref()).unwrap_or_default();
  let intro = match details.filter(|d| !d.is_empty()) {
    Some(details) => format!("{}\n\n{page_intro}", details.render()),
    None => page_intro.to_string(),
  };
  let rows: Vec<String> = works.iter().map(table_row).collect();
  let work_rows: Vec<String> = works.iter().map(work_details).collect();

  page_document(&front_matter, &intro, &rows, &work_rows)
}
