use crate::organ::{OrganCatalog, OrganId};
use html_escape::encode_text;

/// What the tooltip and the detail panel show for a picked organ.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TooltipContent {
    pub id: OrganId,
    pub title: String,
    pub short_desc: String,
    pub long_desc: String,
}

impl TooltipContent {
    /// An organ without its own record borrows the `body` record; with
    /// neither, the raw id is the title and the descriptions are empty.
    pub fn for_organ(id: OrganId, catalog: &OrganCatalog) -> Self {
        match catalog.get(id).or_else(|| catalog.get(OrganId::Body)) {
            Some(r) => Self {
                id,
                title: r.display_name.clone(),
                short_desc: r.short_desc.clone(),
                long_desc: r.long_desc.clone().unwrap_or_default(),
            },
            None => Self {
                id,
                title: id.as_str().to_string(),
                short_desc: String::new(),
                long_desc: String::new(),
            },
        }
    }

    pub fn has_details(&self) -> bool {
        !self.long_desc.is_empty() || !self.short_desc.is_empty()
    }
}

pub fn render_tooltip_html(content: &TooltipContent) -> String {
    let mut html = format!("<strong>{}</strong>", encode_text(&content.title));
    if !content.short_desc.is_empty() {
        html.push_str(&format!("<p>{}</p>", encode_text(&content.short_desc)));
    }
    if content.has_details() {
        html.push_str(&format!(
            "<button class='tooltip-more' data-organ='{}'>Details</button>",
            content.id
        ));
    }
    html
}

pub fn render_detail_html(content: &TooltipContent) -> String {
    let body = if content.long_desc.is_empty() {
        &content.short_desc
    } else {
        &content.long_desc
    };
    let paragraphs: String = body
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("<p>{}</p>", encode_text(p)))
        .collect();
    format!("<h2>{}</h2>{}", encode_text(&content.title), paragraphs)
}
