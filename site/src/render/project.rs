use folio_core::domain::NormalizedRecord;
use folio_core::text::MIDI_BUNDLE;
use folio_sources::{CollectionConfig, ProjectConfig};

use super::{page, page_document, table_row};

/// Festival ausente en una obra de colección.
const NO_FESTIVAL: &str = "–";

fn work_details(work: &NormalizedRecord) -> String {
  format!(
    "### {title}<br/><span class=\"work-subtitle\">{subtitle}</span>\n{{: #work-{id_slug}}}\n\n\
     |<span class=\"label-col\">genre</span>|{genre}|\n\
     |<span class=\"label-col\">festival</span>|{festival}|\n\
     |<span class=\"label-col\">scoring</span>|{scoring}|\n\
     |<span class=\"label-col\">scores</span>|{assets}|\n\
     |<span class=\"label-col\">license</span>|{license}|\n\
     {{: class=\"work-table\"}}\n",
    title = work.title,
    subtitle = work.subtitle,
    id_slug = work.id_slug,
    genre = work.genre,
    festival = work.festival.as_deref().unwrap_or(NO_FESTIVAL),
    scoring = work.scoring,
    assets = work.asset_links(),
    license = work.license_snippet(),
  )
}

fn intro(config: &CollectionConfig, n_works: usize, hosted_base_url: &str) -> String {
  let base = hosted_base_url.trim_end_matches('/');
  let summary = match &config.release {
    Some(release) => format!("*Current release: {release} containing {n_works} works*"),
    None => format!("*{n_works} works*"),
  };

  format!(
    "{intro}\n\nMIDI files of all works are available [in this archive]({base}/{name}/{MIDI_BUNDLE}).\n\n{summary}",
    intro = config.intro.trim(),
    name = config.name,
  )
}

/// Página de un proyecto. `works` ya viene ordenado por título.
pub fn render_project_page(config: &CollectionConfig, works: &[NormalizedRecord], hosted_base_url: &str) -> String {
  let front_matter = format!("title: {}\npermalink: /projects/{}/\n", config.title, config.name);
  let rows: Vec<String> = works.iter().map(table_row).collect();
  let details: Vec<String> = works.iter().map(work_details).collect();

  page_document(&front_matter, &intro(config, works.len(), hosted_base_url), &rows, &details)
}

/// Página de proyecto curado: obras de compositor, con su tabla completa.
pub fn render_curated_page(project: &ProjectConfig, works: &[NormalizedRecord]) -> String {
  let front_matter = format!("title: {}\npermalink: /projects/{}/\n", project.title, project.name);
  let rows: Vec<String> = works.iter().map(table_row).collect();
  let details: Vec<String> = works.iter().map(page::work_details).collect();

  page_document(&front_matter, project.intro.trim(), &rows, &details)
}
