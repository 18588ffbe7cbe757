mod fetch;
mod pack;

pub use fetch::{fetch_template_pack, TemplateCache};
pub use pack::{ActivityTemplate, TemplateError, TemplatePack};
