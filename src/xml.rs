//! XML corpus codec
//!
//! Layout: `<corpus>` holds one `<itemList>` per group, each holding
//! `<item>` elements with fixed-name children (`source`, `title`,
//! `description`, `category`, `pubDate`) and an optional `<analysis>` of
//! `<token>` elements carrying the six annotation fields in order
//! `Form, Lemma, POS, Gouv_lemme, Gouv_pos, Rel`.
//!
//! Categories are stored as a single comma-joined string, which is lossy
//! when a category value itself contains a comma. An item with an empty
//! analysis is written without an `<analysis>` element and reads back
//! empty. A required element that is missing entirely is a malformed
//! record; present-but-empty elements decode to empty strings.

use crate::corpus::{Corpus, Item, Token};
use crate::format::CodecError;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{BufRead, Write};

fn xml_err(e: impl std::fmt::Display) -> CodecError {
    CodecError::Xml(e.to_string())
}

fn structural(message: &str) -> CodecError {
    CodecError::Malformed {
        format: "xml",
        message: message.to_string(),
    }
}

/// Encode a corpus as tab-indented XML with a declaration
pub fn write_xml<W: Write>(corpus: &Corpus, writer: W) -> Result<(), CodecError> {
    let mut xml = Writer::new_with_indent(writer, b'\t', 1);
    xml.write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(xml_err)?;

    start(&mut xml, "corpus")?;
    for group in &corpus.items {
        start(&mut xml, "itemList")?;
        for item in group {
            start(&mut xml, "item")?;
            leaf(&mut xml, "source", &item.source)?;
            leaf(&mut xml, "title", &item.title)?;
            leaf(&mut xml, "description", &item.description)?;
            leaf(&mut xml, "category", &item.category.join(","))?;
            leaf(&mut xml, "pubDate", &item.pub_date)?;
            if !item.analysis.is_empty() {
                start(&mut xml, "analysis")?;
                for token in &item.analysis {
                    start(&mut xml, "token")?;
                    leaf(&mut xml, "Form", &token.form)?;
                    leaf(&mut xml, "Lemma", &token.lemma)?;
                    leaf(&mut xml, "POS", &token.pos)?;
                    leaf(&mut xml, "Gouv_lemme", &token.gov_lemma)?;
                    leaf(&mut xml, "Gouv_pos", &token.gov_pos)?;
                    leaf(&mut xml, "Rel", &token.deprel)?;
                    end(&mut xml, "token")?;
                }
                end(&mut xml, "analysis")?;
            }
            end(&mut xml, "item")?;
        }
        end(&mut xml, "itemList")?;
    }
    end(&mut xml, "corpus")?;
    Ok(())
}

fn start<W: Write>(xml: &mut Writer<W>, tag: &str) -> Result<(), CodecError> {
    xml.write_event(Event::Start(BytesStart::new(tag))).map_err(xml_err)
}

fn end<W: Write>(xml: &mut Writer<W>, tag: &str) -> Result<(), CodecError> {
    xml.write_event(Event::End(BytesEnd::new(tag))).map_err(xml_err)
}

fn leaf<W: Write>(xml: &mut Writer<W>, tag: &str, text: &str) -> Result<(), CodecError> {
    start(xml, tag)?;
    xml.write_event(Event::Text(BytesText::new(text))).map_err(xml_err)?;
    end(xml, tag)
}

/// Partially decoded item, fields checked only once the element closes
#[derive(Default)]
struct ItemFields {
    source: Option<String>,
    title: Option<String>,
    description: Option<String>,
    category: Option<String>,
    pub_date: Option<String>,
    analysis: Vec<Token>,
}

impl ItemFields {
    fn set(&mut self, tag: &[u8], value: String) {
        match tag {
            b"source" => self.source = Some(value),
            b"title" => self.title = Some(value),
            b"description" => self.description = Some(value),
            b"category" => self.category = Some(value),
            b"pubDate" => self.pub_date = Some(value),
            _ => {}
        }
    }

    fn finish(self) -> Result<Item, CodecError> {
        fn require(field: Option<String>, name: &'static str) -> Result<String, CodecError> {
            field.ok_or(CodecError::MissingField { field: name, context: "item" })
        }

        let category = require(self.category, "category")?;
        let category = if category.is_empty() {
            Vec::new()
        } else {
            category.split(',').map(str::to_string).collect()
        };

        Ok(Item {
            source: require(self.source, "source")?,
            title: require(self.title, "title")?,
            description: require(self.description, "description")?,
            category,
            pub_date: require(self.pub_date, "pubDate")?,
            analysis: self.analysis,
        })
    }
}

#[derive(Default)]
struct TokenFields {
    form: Option<String>,
    lemma: Option<String>,
    pos: Option<String>,
    gov_lemma: Option<String>,
    gov_pos: Option<String>,
    deprel: Option<String>,
}

impl TokenFields {
    fn set(&mut self, tag: &[u8], value: String) {
        match tag {
            b"Form" => self.form = Some(value),
            b"Lemma" => self.lemma = Some(value),
            b"POS" => self.pos = Some(value),
            b"Gouv_lemme" => self.gov_lemma = Some(value),
            b"Gouv_pos" => self.gov_pos = Some(value),
            b"Rel" => self.deprel = Some(value),
            _ => {}
        }
    }

    fn finish(self) -> Result<Token, CodecError> {
        fn require(field: Option<String>, name: &'static str) -> Result<String, CodecError> {
            field.ok_or(CodecError::MissingField { field: name, context: "token" })
        }

        Ok(Token {
            form: require(self.form, "Form")?,
            lemma: require(self.lemma, "Lemma")?,
            pos: require(self.pos, "POS")?,
            gov_lemma: require(self.gov_lemma, "Gouv_lemme")?,
            gov_pos: require(self.gov_pos, "Gouv_pos")?,
            deprel: require(self.deprel, "Rel")?,
        })
    }
}

/// Decode a corpus from XML
pub fn read_xml<R: BufRead>(reader: R) -> Result<Corpus, CodecError> {
    let mut xml = Reader::from_reader(reader);
    let mut buf = Vec::new();

    let mut corpus = Corpus::new();
    let mut group: Option<Vec<Item>> = None;
    let mut item: Option<ItemFields> = None;
    let mut token: Option<TokenFields> = None;
    let mut text = String::new();
    let mut in_leaf = false;

    loop {
        match xml.read_event_into(&mut buf).map_err(xml_err)? {
            Event::Start(e) => match e.name().as_ref() {
                b"corpus" => {}
                b"itemList" => group = Some(Vec::new()),
                b"item" => item = Some(ItemFields::default()),
                b"analysis" => {}
                b"token" => token = Some(TokenFields::default()),
                _ => {
                    in_leaf = true;
                    text.clear();
                }
            },
            Event::Text(t) => {
                if in_leaf {
                    text.push_str(&t.unescape().map_err(xml_err)?);
                }
            }
            Event::Empty(e) => {
                // self-closed leaf, e.g. <category/>
                let tag = e.name();
                let tag = tag.as_ref();
                if let Some(fields) = token.as_mut() {
                    fields.set(tag, String::new());
                } else if let Some(fields) = item.as_mut() {
                    fields.set(tag, String::new());
                }
            }
            Event::End(e) => match e.name().as_ref() {
                b"corpus" => {}
                b"itemList" => {
                    let group = group.take().ok_or_else(|| structural("itemList closed outside corpus"))?;
                    corpus.items.push(group);
                }
                b"item" => {
                    let fields = item.take().ok_or_else(|| structural("item closed outside itemList"))?;
                    let group = group.as_mut().ok_or_else(|| structural("item outside itemList"))?;
                    group.push(fields.finish()?);
                }
                b"analysis" => {}
                b"token" => {
                    let fields = token.take().ok_or_else(|| structural("token closed outside analysis"))?;
                    let item = item.as_mut().ok_or_else(|| structural("token outside item"))?;
                    item.analysis.push(fields.finish()?);
                }
                tag => {
                    in_leaf = false;
                    let value = std::mem::take(&mut text);
                    if let Some(fields) = token.as_mut() {
                        fields.set(tag, value);
                    } else if let Some(fields) = item.as_mut() {
                        fields.set(tag, value);
                    }
                }
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(corpus)
}
