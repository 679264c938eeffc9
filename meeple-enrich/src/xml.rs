//! Parsers for the game database's XML responses.

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::error::EnrichError;
use crate::types::{GameDetails, GameName, SearchHit};

/// Parse a search response into one hit per `<name>` element.
pub fn parse_search(xml: &str) -> Result<Vec<SearchHit>, EnrichError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut hits = Vec::new();
    let mut current_id: Option<String> = None;
    let mut in_name = false;
    let mut name_primary = false;
    let mut name_text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"boardgame" => current_id = attr_value(e, b"objectid")?,
                b"name" => {
                    in_name = true;
                    name_primary = attr_value(e, b"primary")?.as_deref() == Some("true");
                    name_text.clear();
                }
                _ => {}
            },
            Event::Text(ref e) => {
                if in_name {
                    name_text.push_str(&e.unescape()?);
                }
            }
            Event::End(ref e) => {
                if e.name().as_ref() == b"name" {
                    if let Some(id) = &current_id {
                        if !name_text.is_empty() {
                            hits.push(SearchHit {
                                object_id: id.clone(),
                                name: name_text.clone(),
                                primary: name_primary,
                            });
                        }
                    }
                    in_name = false;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(hits)
}

/// Parse a by-id detail response. Only the first `<boardgame>` element is
/// read; the endpoint returns one per requested id.
pub fn parse_game_details(xml: &str) -> Result<Option<GameDetails>, EnrichError> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut details: Option<GameDetails> = None;
    // Which text-bearing child of <boardgame> we are inside, if any.
    let mut field = Field::None;
    let mut name_primary = false;
    let mut buf = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(ref e) => match e.name().as_ref() {
                b"boardgame" if details.is_none() => {
                    details = Some(GameDetails {
                        object_id: attr_value(e, b"objectid")?.unwrap_or_default(),
                        ..GameDetails::default()
                    });
                }
                b"name" if details.is_some() => {
                    field = Field::Name;
                    name_primary = attr_value(e, b"primary")?.as_deref() == Some("true");
                    buf.clear();
                }
                b"yearpublished" if details.is_some() => {
                    field = Field::Year;
                    buf.clear();
                }
                b"description" if details.is_some() => {
                    field = Field::Description;
                    buf.clear();
                }
                _ => {}
            },
            Event::Text(ref e) => {
                if field != Field::None {
                    buf.push_str(&e.unescape()?);
                }
            }
            Event::End(ref e) => {
                let Some(d) = details.as_mut() else {
                    continue;
                };
                match e.name().as_ref() {
                    b"name" if field == Field::Name => {
                        if !buf.is_empty() {
                            d.names.push(GameName {
                                text: buf.clone(),
                                primary: name_primary,
                            });
                        }
                        field = Field::None;
                    }
                    b"yearpublished" if field == Field::Year => {
                        d.year_published = buf.trim().parse().ok();
                        field = Field::None;
                    }
                    b"description" if field == Field::Description => {
                        if !buf.is_empty() {
                            d.description = Some(buf.clone());
                        }
                        field = Field::None;
                    }
                    // First game only.
                    b"boardgame" => break,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(details.filter(|d| !d.object_id.is_empty() || !d.names.is_empty()))
}

#[derive(Debug, PartialEq, Eq)]
enum Field {
    None,
    Name,
    Year,
    Description,
}

fn attr_value(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, EnrichError> {
    for attr in e.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == key {
            return Ok(Some(String::from_utf8_lossy(&attr.value).to_string()));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_response_with_multiple_hits() {
        let xml = r#"<boardgames>
            <boardgame objectid="13"><name primary="true">CATAN</name></boardgame>
            <boardgame objectid="2655"><name>Catan Card Game</name></boardgame>
        </boardgames>"#;
        let hits = parse_search(xml).unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].object_id, "13");
        assert!(hits[0].primary);
        assert_eq!(hits[1].name, "Catan Card Game");
        assert!(!hits[1].primary);
    }

    #[test]
    fn empty_search_response() {
        let hits = parse_search("<boardgames></boardgames>").unwrap();
        assert!(hits.is_empty());
    }

    #[test]
    fn detail_response() {
        let xml = r#"<boardgames>
            <boardgame objectid="13">
                <yearpublished>1995</yearpublished>
                <name sortindex="1" primary="true">CATAN</name>
                <name sortindex="1">Колонизаторы</name>
                <description>Build &amp; trade.&lt;br/&gt;Classic.</description>
            </boardgame>
        </boardgames>"#;
        let d = parse_game_details(xml).unwrap().unwrap();
        assert_eq!(d.object_id, "13");
        assert_eq!(d.year_published, Some(1995));
        assert_eq!(d.names.len(), 2);
        assert!(d.names[0].primary);
        assert_eq!(d.description.as_deref(), Some("Build & trade.<br/>Classic."));
    }

    #[test]
    fn missing_game_yields_none() {
        assert!(parse_game_details("<boardgames></boardgames>").unwrap().is_none());
    }
}
