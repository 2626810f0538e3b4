use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use serde_json::Value;
use std::io::Cursor;

const ROOT_TAG: &str = "response";
const ITEM_TAG: &str = "item";

/// Singularize array field names for XML child elements.
fn singular(field: &str) -> &str {
    match field {
        "links" => "link",
        "books" => "book",
        "failures" => "failure",
        "value" | ROOT_TAG => ITEM_TAG,
        _ => field,
    }
}

/// Recursively write a serde_json::Value as XML elements.
fn write_value<W: std::io::Write>(
    writer: &mut Writer<W>,
    tag: &str,
    value: &Value,
) -> Result<(), quick_xml::Error> {
    match value {
        Value::Null => {
            // Omit null fields entirely
        }
        Value::Bool(_) | Value::Number(_) | Value::String(_) => {
            let text = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            writer.write_event(Event::Text(BytesText::new(&text)))?;
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        Value::Array(arr) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            let child_tag = singular(tag);
            for item in arr {
                write_value(writer, child_tag, item)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
        Value::Object(map) => {
            writer.write_event(Event::Start(BytesStart::new(tag)))?;
            for (key, val) in map {
                write_value(writer, key, val)?;
            }
            writer.write_event(Event::End(BytesEnd::new(tag)))?;
        }
    }
    Ok(())
}

/// Serialize a response body into an XML document rooted at `<response>`.
pub fn to_xml(body: &Value) -> Result<String, quick_xml::Error> {
    let mut writer = Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2);

    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    match body {
        Value::Array(items) if items.is_empty() => {
            writer.write_event(Event::Empty(BytesStart::new(ROOT_TAG)))?;
        }
        _ => write_value(&mut writer, ROOT_TAG, body)?,
    }

    let buf = writer.into_inner().into_inner();
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
