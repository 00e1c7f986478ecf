//! Transformaciones puras de texto: marcado LaTeX a texto plano, slugs y
//! nombres de partes.

pub mod markup;
pub mod part_name;
pub mod slug;

pub use markup::markup_to_text;
pub use part_name::{MIDI_BUNDLE, MIDI_LABEL, NBSP, format_part_name};
pub use slug::slugify;
