//! RSS 2.0 rendering for weekly digest feeds
use crate::types::{DigestError, DigestFeed, FeedEntry, Result};
use quick_xml::events::{BytesCData, BytesDecl, BytesText, Event};
use quick_xml::Writer;
use std::io::Cursor;

const GENERATOR: &str = "bouquet-digest";
const DC_NAMESPACE: &str = "http://purl.org/dc/elements/1.1/";
const ATOM_NAMESPACE: &str = "http://www.w3.org/2005/Atom";

pub const CONTENT_TYPE: &str = "application/rss+xml";

/// Serialize a digest feed. Entry descriptions are already escaped HTML and
/// go out as CDATA; every other field is escaped text.
pub fn render_rss(feed: &DigestFeed) -> Result<String> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element("rss")
        .with_attribute(("version", "2.0"))
        .with_attribute(("xmlns:dc", DC_NAMESPACE))
        .with_attribute(("xmlns:atom", ATOM_NAMESPACE))
        .write_inner_content(|w| {
            w.create_element("channel").write_inner_content(|w| {
                w.create_element("title")
                    .write_text_content(BytesText::new(&feed.title))?;
                w.create_element("description")
                    .write_text_content(BytesText::new(&feed.description))?;
                w.create_element("link")
                    .write_text_content(BytesText::new(&feed.site_url))?;
                w.create_element("generator")
                    .write_text_content(BytesText::new(GENERATOR))?;
                w.create_element("lastBuildDate")
                    .write_text_content(BytesText::new(&feed.pub_date.to_rfc2822()))?;
                w.create_element("atom:link")
                    .with_attribute(("href", feed.feed_url.as_str()))
                    .with_attribute(("rel", "self"))
                    .with_attribute(("type", CONTENT_TYPE))
                    .write_empty()?;
                w.create_element("pubDate")
                    .write_text_content(BytesText::new(&feed.pub_date.to_rfc2822()))?;

                for entry in &feed.entries {
                    write_item(w, entry)?;
                }
                Ok::<(), quick_xml::Error>(())
            })?;
            Ok::<(), quick_xml::Error>(())
        })?;

    let bytes = writer.into_inner().into_inner();
    String::from_utf8(bytes).map_err(|e| DigestError::General(format!("rendered feed is not UTF-8: {}", e)))
}

fn write_item(w: &mut Writer<Cursor<Vec<u8>>>, entry: &FeedEntry) -> quick_xml::Result<()> {
    w.create_element("item").write_inner_content(|w| {
        w.create_element("title")
            .write_text_content(BytesText::new(&entry.title))?;
        w.create_element("description")
            .write_cdata_content(BytesCData::new(&entry.description_html))?;
        w.create_element("link")
            .write_text_content(BytesText::new(&entry.url))?;
        w.create_element("guid")
            .with_attribute(("isPermaLink", "false"))
            .write_text_content(BytesText::new(&entry.guid))?;
        w.create_element("dc:creator")
            .write_text_content(BytesText::new(&entry.author))?;
        w.create_element("pubDate")
            .write_text_content(BytesText::new(&entry.date.to_rfc2822()))?;
        Ok::<(), quick_xml::Error>(())
    })?;
    Ok(())
}

/// JSON body for the common emoji endpoint
pub fn render_emoji_json(emojis: &[String]) -> Result<String> {
    Ok(serde_json::to_string(emojis)?)
}
