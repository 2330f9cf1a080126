//! Media blocks: images and embedded players

use std::sync::Arc;

use crate::core::block::{escape, or, BlockKind};
use crate::core::fields::{join_parts, part, parts, BlockFields};
use crate::core::markup::{text_of, Element};
use crate::core::BlockRecord;

/// `url|title|caption`
pub struct ImageKind;

impl BlockKind for ImageKind {
    fn name(&self) -> &'static str {
        "image"
    }

    fn decode(&self, text: &str) -> BlockFields {
        let p = parts(text);
        BlockFields::Image {
            url: part(&p, 0),
            title: part(&p, 1),
            caption: part(&p, 2),
        }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Image { url, title, caption } => Some(join_parts(&[url, title, caption])),
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let p = parts(&record.text);
        let url = part(&p, 0);
        let title = part(&p, 1);
        let caption = part(&p, 2);

        let mut html = format!(
            "  <figure class=\"ef-image-block\">\n    <img src=\"{}\" alt=\"{}\" class=\"ef-image\">\n",
            escape(&url),
            escape(or(&title, "Image"))
        );
        if !caption.is_empty() {
            html.push_str(&format!(
                "    <figcaption class=\"ef-image-caption\">{}</figcaption>\n",
                escape(&caption)
            ));
        }
        html.push_str("  </figure>\n");
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let img = el.first_tag("img");
        let url = img.and_then(|i| i.attr("src")).unwrap_or("");
        let title = img.and_then(|i| i.attr("alt")).unwrap_or("");
        let caption = text_of(el.first_tag("figcaption"));
        self.record(join_parts(&[url, title, caption.as_str()]))
    }
}

/// `provider|url|caption`; provider is `youtube`, `vimeo` or `iframe`
pub struct EmbedKind;

impl BlockKind for EmbedKind {
    fn name(&self) -> &'static str {
        "embed"
    }

    fn decode(&self, text: &str) -> BlockFields {
        let p = parts(text);
        BlockFields::Embed {
            provider: part(&p, 0),
            url: part(&p, 1),
            caption: part(&p, 2),
        }
    }

    fn encode(&self, fields: &BlockFields) -> Option<String> {
        match fields {
            BlockFields::Embed { provider, url, caption } => {
                Some(join_parts(&[provider, url, caption]))
            }
            _ => None,
        }
    }

    fn render(&self, record: &BlockRecord) -> String {
        let p = parts(&record.text);
        let provider = part(&p, 0);
        let url = part(&p, 1);
        let caption = part(&p, 2);
        let src = embed_url(or(&provider, "youtube"), &url);

        let mut html = format!(
            "  <div class=\"ef-embed-block\" data-provider=\"{}\" data-url=\"{}\">\n    <div class=\"ef-embed-container\">\n      <iframe src=\"{}\" frameborder=\"0\" allowfullscreen></iframe>\n    </div>\n",
            escape(&provider),
            escape(&url),
            escape(&src)
        );
        if !caption.is_empty() {
            html.push_str(&format!(
                "    <div class=\"ef-embed-caption\">{}</div>\n",
                escape(&caption)
            ));
        }
        html.push_str("  </div>\n");
        html
    }

    fn import(&self, el: &Element) -> BlockRecord {
        let src = el
            .first_tag("iframe")
            .and_then(|iframe| iframe.attr("src"))
            .unwrap_or("");

        // Older exports carry only the player URL.
        let provider = match el.attr("data-provider") {
            Some(provider) => provider,
            None if src.contains("youtube.com") => "youtube",
            None if src.contains("vimeo.com") => "vimeo",
            None => "iframe",
        };
        let url = el.attr("data-url").unwrap_or(src);
        let caption = text_of(el.first_class("ef-embed-caption"));

        self.record(join_parts(&[provider, url, caption.as_str()]))
    }
}

/// Player URL for a share or watch URL.
pub fn embed_url(provider: &str, url: &str) -> String {
    match provider {
        "youtube" => match youtube_id(url) {
            Some(id) => format!("https://www.youtube.com/embed/{id}"),
            None => url.to_string(),
        },
        "vimeo" => {
            let id = url.rsplit('/').next().unwrap_or_default();
            format!("https://player.vimeo.com/video/{id}")
        }
        _ => url.to_string(),
    }
}

fn youtube_id(url: &str) -> Option<&str> {
    let id = if let Some((_, rest)) = url.split_once("youtube.com/watch?v=") {
        rest.split('&').next()
    } else if let Some((_, rest)) = url.split_once("youtu.be/") {
        rest.split('?').next()
    } else if let Some((_, rest)) = url.split_once("youtube.com/embed/") {
        rest.split('?').next()
    } else {
        None
    };
    id.filter(|id| !id.is_empty())
}

pub fn kinds() -> Vec<Arc<dyn BlockKind>> {
    vec![Arc::new(ImageKind), Arc::new(EmbedKind)]
}

pub fn detect(el: &Element) -> Option<&'static str> {
    if el.is("figure") && el.has_class("ef-image-block") {
        Some("image")
    } else if el.is("div") && el.has_class("ef-embed-block") {
        Some("embed")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::markup::Fragment;

    fn reimport(kind: &dyn BlockKind, record: &BlockRecord) -> BlockRecord {
        let fragment = Fragment::parse(&kind.render(record)).unwrap();
        let imported = kind.import(fragment.elements().next().unwrap());
        imported
    }

    #[test]
    fn test_embed_url_transforms() {
        assert_eq!(
            embed_url("youtube", "https://www.youtube.com/watch?v=jNQXAC9IVRw&t=4"),
            "https://www.youtube.com/embed/jNQXAC9IVRw"
        );
        assert_eq!(
            embed_url("youtube", "https://youtu.be/abc123?si=x"),
            "https://www.youtube.com/embed/abc123"
        );
        assert_eq!(
            embed_url("vimeo", "https://vimeo.com/76979871"),
            "https://player.vimeo.com/video/76979871"
        );
        assert_eq!(embed_url("iframe", "https://maps.example"), "https://maps.example");
        assert_eq!(embed_url("youtube", "https://example.com/v"), "https://example.com/v");
    }

    #[test]
    fn test_embed_keeps_original_url() {
        let record = EmbedKind.record(
            "youtube|https://www.youtube.com/watch?v=jNQXAC9IVRw|First video".into(),
        );
        let html = EmbedKind.render(&record);
        assert!(html.contains("https://www.youtube.com/embed/jNQXAC9IVRw"));
        assert_eq!(reimport(&EmbedKind, &record), record);
    }

    #[test]
    fn test_embed_sniffs_legacy_markup() {
        let fragment = Fragment::parse(
            r#"<div class="ef-embed-block"><iframe src="https://player.vimeo.com/video/1"></iframe></div>"#,
        )
        .unwrap();
        let record = EmbedKind.import(fragment.elements().next().unwrap());
        assert_eq!(record.text, "vimeo|https://player.vimeo.com/video/1|");
    }

    #[test]
    fn test_image_roundtrip_and_escaping() {
        let record = ImageKind.record("https://img.example/a.png?x=1&y=2|Alt \"quoted\"|A caption".into());
        let html = ImageKind.render(&record);
        assert!(html.contains("x=1&amp;y=2"));
        assert_eq!(reimport(&ImageKind, &record), record);
    }

    #[test]
    fn test_image_empty_title_imports_as_default() {
        let back = reimport(&ImageKind, &ImageKind.record("a.png||Cap".into()));
        assert_eq!(back.text, "a.png|Image|Cap");
    }

    #[test]
    fn test_image_without_caption() {
        let html = ImageKind.render(&ImageKind.record("a.png|Title|".into()));
        assert!(!html.contains("figcaption"));
    }
}
