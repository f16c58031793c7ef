//! XML-RPC wire codec.
//!
//! Encoding writes the canonical `methodCall` / `methodResponse` documents.
//! Decoding is a small pull parser over `quick-xml` events that accepts the
//! variations real servers emit: untyped `<value>text</value>` strings,
//! `<i4>`/`<int>`/`<i8>` integers, `<nil/>`, and insignificant whitespace
//! between structural elements.

use std::collections::BTreeMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::NaiveDateTime;
use quick_xml::escape::escape;
use quick_xml::events::Event;
use quick_xml::Reader;

use crate::errors::NavigatorError;
use crate::xmlrpc::Value;

const DATETIME_FORMAT: &str = "%Y%m%dT%H:%M:%S";

pub fn encode_method_call(method: &str, params: &[Value]) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?><methodCall><methodName>");
    out.push_str(&escape(method));
    out.push_str("</methodName><params>");
    for param in params {
        out.push_str("<param>");
        write_value(&mut out, param);
        out.push_str("</param>");
    }
    out.push_str("</params></methodCall>");
    out
}

pub fn encode_response(value: &Value) -> String {
    let mut out = String::from("<?xml version=\"1.0\"?><methodResponse><params><param>");
    write_value(&mut out, value);
    out.push_str("</param></params></methodResponse>");
    out
}

pub fn encode_fault(code: i64, message: &str) -> String {
    let fault = Value::structure([
        ("faultCode", Value::Int(code)),
        ("faultString", Value::from(message)),
    ]);
    let mut out = String::from("<?xml version=\"1.0\"?><methodResponse><fault>");
    write_value(&mut out, &fault);
    out.push_str("</fault></methodResponse>");
    out
}

fn write_value(out: &mut String, value: &Value) {
    out.push_str("<value>");
    match value {
        Value::Int(i) => {
            if i32::try_from(*i).is_ok() {
                out.push_str(&format!("<int>{}</int>", i));
            } else {
                out.push_str(&format!("<i8>{}</i8>", i));
            }
        }
        Value::Bool(b) => out.push_str(if *b {
            "<boolean>1</boolean>"
        } else {
            "<boolean>0</boolean>"
        }),
        Value::String(s) => {
            out.push_str("<string>");
            out.push_str(&escape(s.as_str()));
            out.push_str("</string>");
        }
        Value::Double(d) => out.push_str(&format!("<double>{}</double>", d)),
        Value::DateTime(dt) => out.push_str(&format!(
            "<dateTime.iso8601>{}</dateTime.iso8601>",
            dt.format(DATETIME_FORMAT)
        )),
        Value::Base64(bytes) => {
            out.push_str("<base64>");
            out.push_str(&STANDARD.encode(bytes));
            out.push_str("</base64>");
        }
        Value::Array(items) => {
            out.push_str("<array><data>");
            for item in items {
                write_value(out, item);
            }
            out.push_str("</data></array>");
        }
        Value::Struct(members) => {
            out.push_str("<struct>");
            for (name, member) in members {
                out.push_str("<member><name>");
                out.push_str(&escape(name.as_str()));
                out.push_str("</name>");
                write_value(out, member);
                out.push_str("</member>");
            }
            out.push_str("</struct>");
        }
        Value::Nil => out.push_str("<nil/>"),
    }
    out.push_str("</value>");
}

/// Decode a `methodResponse` document. Faults become `NavigatorError::Fault`.
pub fn decode_response(xml: &str) -> Result<Value, NavigatorError> {
    let mut reader = ValueReader::new(xml);
    reader.expect_start(b"methodResponse")?;

    match reader.next_significant()? {
        Event::Start(e) if e.name().as_ref() == b"params" => {
            reader.expect_start(b"param")?;
            reader.read_value_element()
        }
        Event::Start(e) if e.name().as_ref() == b"fault" => {
            let fault = reader.read_value_element()?;
            Err(fault_from_value(&fault))
        }
        other => Err(unexpected("<params> or <fault>", &other)),
    }
}

/// Decode a `methodCall` document into its method name and parameters.
pub fn decode_method_call(xml: &str) -> Result<(String, Vec<Value>), NavigatorError> {
    let mut reader = ValueReader::new(xml);
    reader.expect_start(b"methodCall")?;
    reader.expect_start(b"methodName")?;
    let method = reader.read_text(b"methodName")?.trim().to_string();

    let mut params = Vec::new();
    match reader.next_significant()? {
        Event::Start(e) if e.name().as_ref() == b"params" => loop {
            match reader.next_significant()? {
                Event::Start(e) if e.name().as_ref() == b"param" => {
                    params.push(reader.read_value_element()?);
                    reader.expect_end(b"param")?;
                }
                Event::End(e) if e.name().as_ref() == b"params" => break,
                other => return Err(unexpected("<param>", &other)),
            }
        },
        Event::Empty(e) if e.name().as_ref() == b"params" => {}
        Event::End(e) if e.name().as_ref() == b"methodCall" => {}
        other => return Err(unexpected("<params>", &other)),
    }

    Ok((method, params))
}

fn fault_from_value(fault: &Value) -> NavigatorError {
    let code = match fault.get("faultCode") {
        Some(Value::Int(code)) => *code,
        Some(Value::String(code)) => code.trim().parse().unwrap_or(0),
        _ => 0,
    };
    let message = fault
        .get("faultString")
        .and_then(Value::as_str)
        .unwrap_or("unknown fault")
        .to_string();
    NavigatorError::Fault { code, message }
}

fn describe(event: &Event) -> String {
    match event {
        Event::Start(e) => format!("<{}>", String::from_utf8_lossy(e.name().as_ref())),
        Event::End(e) => format!("</{}>", String::from_utf8_lossy(e.name().as_ref())),
        Event::Empty(e) => format!("<{}/>", String::from_utf8_lossy(e.name().as_ref())),
        Event::Text(_) | Event::CData(_) => "text".to_string(),
        Event::Eof => "end of document".to_string(),
        _ => "markup".to_string(),
    }
}

fn unexpected(expected: &str, found: &Event) -> NavigatorError {
    NavigatorError::XmlRpcError(format!("expected {}, found {}", expected, describe(found)))
}

struct ValueReader<'a> {
    reader: Reader<&'a [u8]>,
}

impl<'a> ValueReader<'a> {
    fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
        }
    }

    fn next_event(&mut self) -> Result<Event<'a>, NavigatorError> {
        Ok(self.reader.read_event()?)
    }

    /// Next event that carries structure, skipping prolog, comments and whitespace.
    fn next_significant(&mut self) -> Result<Event<'a>, NavigatorError> {
        loop {
            match self.next_event()? {
                Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => continue,
                Event::Decl(_) | Event::Comment(_) | Event::PI(_) | Event::DocType(_) => continue,
                other => return Ok(other),
            }
        }
    }

    fn expect_start(&mut self, name: &[u8]) -> Result<(), NavigatorError> {
        match self.next_significant()? {
            Event::Start(e) if e.name().as_ref() == name => Ok(()),
            other => Err(unexpected(
                &format!("<{}>", String::from_utf8_lossy(name)),
                &other,
            )),
        }
    }

    fn expect_end(&mut self, name: &[u8]) -> Result<(), NavigatorError> {
        match self.next_significant()? {
            Event::End(e) if e.name().as_ref() == name => Ok(()),
            other => Err(unexpected(
                &format!("</{}>", String::from_utf8_lossy(name)),
                &other,
            )),
        }
    }

    /// Character data up to the closing `end` tag.
    fn read_text(&mut self, end: &[u8]) -> Result<String, NavigatorError> {
        let mut text = String::new();
        loop {
            match self.next_event()? {
                Event::Text(t) => text.push_str(&t.unescape()?),
                Event::CData(c) => text.push_str(&String::from_utf8_lossy(&c)),
                Event::Comment(_) => {}
                Event::End(e) if e.name().as_ref() == end => return Ok(text),
                other => return Err(unexpected("character data", &other)),
            }
        }
    }

    /// Reads a whole `<value>…</value>` (or `<value/>`) element.
    fn read_value_element(&mut self) -> Result<Value, NavigatorError> {
        match self.next_significant()? {
            Event::Start(e) if e.name().as_ref() == b"value" => self.read_value(),
            Event::Empty(e) if e.name().as_ref() == b"value" => Ok(Value::String(String::new())),
            other => Err(unexpected("<value>", &other)),
        }
    }

    /// Body of a `<value>` whose start tag was already consumed.
    fn read_value(&mut self) -> Result<Value, NavigatorError> {
        let mut untyped = String::new();
        loop {
            match self.next_event()? {
                Event::Text(t) => untyped.push_str(&t.unescape()?),
                Event::CData(c) => untyped.push_str(&String::from_utf8_lossy(&c)),
                Event::Comment(_) => {}
                Event::End(e) if e.name().as_ref() == b"value" => {
                    return Ok(Value::String(untyped));
                }
                Event::Start(e) => {
                    let tag = e.name().as_ref().to_vec();
                    let value = self.read_typed(&tag)?;
                    self.expect_end(b"value")?;
                    return Ok(value);
                }
                Event::Empty(e) => {
                    let value = empty_typed(e.name().as_ref())?;
                    self.expect_end(b"value")?;
                    return Ok(value);
                }
                other => return Err(unexpected("value content", &other)),
            }
        }
    }

    fn read_typed(&mut self, tag: &[u8]) -> Result<Value, NavigatorError> {
        match tag {
            b"int" | b"i4" | b"i8" => {
                let text = self.read_text(tag)?;
                text.trim().parse::<i64>().map(Value::Int).map_err(|e| {
                    NavigatorError::XmlRpcError(format!("invalid integer '{}': {}", text, e))
                })
            }
            b"boolean" => {
                let text = self.read_text(tag)?;
                match text.trim() {
                    "1" | "true" => Ok(Value::Bool(true)),
                    "0" | "false" => Ok(Value::Bool(false)),
                    other => Err(NavigatorError::XmlRpcError(format!(
                        "invalid boolean '{}'",
                        other
                    ))),
                }
            }
            b"string" => Ok(Value::String(self.read_text(tag)?)),
            b"double" => {
                let text = self.read_text(tag)?;
                text.trim().parse::<f64>().map(Value::Double).map_err(|e| {
                    NavigatorError::XmlRpcError(format!("invalid double '{}': {}", text, e))
                })
            }
            b"dateTime.iso8601" => {
                let text = self.read_text(tag)?;
                parse_datetime(text.trim()).map(Value::DateTime)
            }
            b"base64" => {
                let text = self.read_text(tag)?;
                let compact: String = text.chars().filter(|c| !c.is_whitespace()).collect();
                STANDARD
                    .decode(compact.as_bytes())
                    .map(Value::Base64)
                    .map_err(|e| NavigatorError::XmlRpcError(format!("invalid base64: {}", e)))
            }
            b"nil" => {
                self.read_text(tag)?;
                Ok(Value::Nil)
            }
            b"array" => self.read_array(),
            b"struct" => self.read_struct(),
            other => Err(NavigatorError::XmlRpcError(format!(
                "unsupported value type <{}>",
                String::from_utf8_lossy(other)
            ))),
        }
    }

    fn read_array(&mut self) -> Result<Value, NavigatorError> {
        let mut items = Vec::new();
        match self.next_significant()? {
            Event::Start(e) if e.name().as_ref() == b"data" => loop {
                match self.next_significant()? {
                    Event::Start(e) if e.name().as_ref() == b"value" => {
                        items.push(self.read_value()?)
                    }
                    Event::Empty(e) if e.name().as_ref() == b"value" => {
                        items.push(Value::String(String::new()))
                    }
                    Event::End(e) if e.name().as_ref() == b"data" => break,
                    other => return Err(unexpected("<value> or </data>", &other)),
                }
            },
            Event::Empty(e) if e.name().as_ref() == b"data" => {}
            Event::End(e) if e.name().as_ref() == b"array" => return Ok(Value::Array(items)),
            other => return Err(unexpected("<data>", &other)),
        }
        self.expect_end(b"array")?;
        Ok(Value::Array(items))
    }

    fn read_struct(&mut self) -> Result<Value, NavigatorError> {
        let mut members = BTreeMap::new();
        loop {
            match self.next_significant()? {
                Event::Start(e) if e.name().as_ref() == b"member" => {
                    self.expect_start(b"name")?;
                    let name = self.read_text(b"name")?;
                    let value = self.read_value_element()?;
                    self.expect_end(b"member")?;
                    members.insert(name, value);
                }
                Event::End(e) if e.name().as_ref() == b"struct" => break,
                other => return Err(unexpected("<member> or </struct>", &other)),
            }
        }
        Ok(Value::Struct(members))
    }
}

fn empty_typed(tag: &[u8]) -> Result<Value, NavigatorError> {
    match tag {
        b"nil" => Ok(Value::Nil),
        b"string" => Ok(Value::String(String::new())),
        b"array" => Ok(Value::Array(Vec::new())),
        b"struct" => Ok(Value::Struct(BTreeMap::new())),
        b"base64" => Ok(Value::Base64(Vec::new())),
        other => Err(NavigatorError::XmlRpcError(format!(
            "empty <{}/> is not a valid value",
            String::from_utf8_lossy(other)
        ))),
    }
}

fn parse_datetime(text: &str) -> Result<NaiveDateTime, NavigatorError> {
    NaiveDateTime::parse_from_str(text, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| NavigatorError::XmlRpcError(format!("invalid dateTime '{}': {}", text, e)))
}
