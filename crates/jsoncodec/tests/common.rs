#![allow(missing_docs)]
#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};

use jsoncodec::{
    Codec, DecodeError, EncodedValue,
    codec::{
        any_value, array, empty_as_null, object, optional, string, string_enumeration, transform,
    },
    member,
};

pub const ORIGINAL: &str = r#"
{
    "moderation": {
        "decision": "allow",
        "reason": null
    },
    "request": {
        "filename": "example.rs",
        "language": "rust",
        "options": {
            "opt_level": "2",
            "features": [
                "serde",
                "tokio"
            ]
        }
    },
    "snippets": [
        "fn main() {}",
        "println!(\"hi\")"
    ],
    "entities": [
        {
            "type": "function",
            "name": "main"
        },
        {
            "type": "macro",
            "name": "println"
        }
    ],
    "matrix": [
        [
            "a"
        ]
    ],
    "mixed": [
        "s",
        {
            "k": "v"
        },
        "t",
        [
            "u"
        ],
        "end"
    ],
    "trailing": {
        "status": "ok"
    },
    "object_in_array_last": [
        {
            "a": 1
        }
    ],
    "nested_objects": {
        "outer": {
            "inner": 1
        }
    }
}"#;

/// [`ORIGINAL`] without insignificant whitespace.
pub fn compact() -> String {
    let value: serde_json::Value = serde_json::from_str(ORIGINAL).unwrap();
    serde_json::to_string(&value).unwrap()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Decision {
    #[default]
    Allow,
    Deny,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Moderation {
    pub decision: Decision,
    pub reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    pub opt_level: u8,
    pub features: BTreeSet<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Request {
    pub filename: String,
    pub language: String,
    pub options: Options,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entity {
    pub kind: String,
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolResponse {
    pub moderation: Moderation,
    pub request: Request,
    pub snippets: Vec<String>,
    pub entities: Vec<Entity>,
    pub matrix: Vec<Vec<String>>,
    pub mixed: EncodedValue,
    pub trailing: BTreeMap<String, String>,
    pub object_in_array_last: Vec<BTreeMap<String, u32>>,
    pub nested_objects: EncodedValue,
}

fn moderation() -> impl Codec<Object = Moderation> + Send + Sync + 'static {
    object::<Moderation>()
        .required_with(
            "decision",
            member!(Moderation, decision),
            string_enumeration([(Decision::Allow, "allow"), (Decision::Deny, "deny")]),
        )
        .required_with(
            "reason",
            member!(Moderation, reason),
            empty_as_null(optional(string())),
        )
}

fn options() -> impl Codec<Object = Options> + Send + Sync + 'static {
    object::<Options>()
        .required_with(
            "opt_level",
            member!(Options, opt_level),
            transform(
                string(),
                |level: &u8| level.to_string(),
                |text: String, offset| {
                    text.parse()
                        .map_err(|_| DecodeError::custom("opt_level is not a number", offset))
                },
            ),
        )
        .optional("features", member!(Options, features))
}

/// The schema of [`ORIGINAL`], registered in document order so encoding
/// reproduces [`compact`] exactly.
pub fn tool_response() -> impl Codec<Object = ToolResponse> + Send + Sync + 'static {
    let request = object::<Request>()
        .required("filename", member!(Request, filename))
        .required("language", member!(Request, language))
        .required_with("options", member!(Request, options), options());
    let entity = object::<Entity>()
        .required("type", member!(Entity, kind))
        .required("name", member!(Entity, name));

    object::<ToolResponse>()
        .required_with("moderation", member!(ToolResponse, moderation), moderation())
        .required_with("request", member!(ToolResponse, request), request)
        .required("snippets", member!(ToolResponse, snippets))
        .required_with("entities", member!(ToolResponse, entities), array(entity))
        .required("matrix", member!(ToolResponse, matrix))
        .required_with("mixed", member!(ToolResponse, mixed), any_value())
        .required("trailing", member!(ToolResponse, trailing))
        .required("object_in_array_last", member!(ToolResponse, object_in_array_last))
        .optional("nested_objects", member!(ToolResponse, nested_objects))
}
