use super::lex::{self, Encoder, Header};
use super::token::Catalog;
use super::*;
use crate::mach::{Link, Options};
use std::rc::Rc;


/// A link where `start` is line 100.
fn link(options: &Options) -> Link {
    let mut link = Link::new(options.crunch);
    link.discover(&Header::LabelOnly("start".to_string()));
    link.discover(&Header::Number(100, 3));
    link
}

fn encode_with(options: &Options, text: &str) -> Result<Line, Error> {
    let catalog = Catalog::new(options.extensions);
    let link = link(options);
    let chars: Vec<char> = text.chars().collect();
    let header = lex::header(&chars, &catalog);
    let unit: Rc<str> = Rc::from("test.bas");
    Encoder::new(&catalog, &link, options).encode(&unit, Some(0), &chars, 1, header.offset())
}

fn body_with(options: &Options, text: &str) -> Vec<u8> {
    encode_with(options, text).unwrap().bytes().to_vec()
}

fn body(text: &str) -> Vec<u8> {
    body_with(&Options::default(), text)
}
