//! Wire DTOs for the challenge-filter API.
//!
//! # Design
//! The server sends snake_case keys. Only `name` is required; every other
//! field tolerates being absent or `null` so a sparse record still decodes.
//! camelCase aliases are accepted for the keys older clients used.
//! These types are defined independently from the mock-server crate;
//! integration tests catch schema drift between the two.

use serde::{Deserialize, Deserializer, Serialize};

/// One challenge filter as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChallengeEntity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, alias = "imageUrl", deserialize_with = "null_as_default")]
    pub image_url: Vec<String>,
    #[serde(default, alias = "imageUrlNew", deserialize_with = "null_as_default")]
    pub image_url_new: Vec<ImageUrl>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tab: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub level: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub step: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub mediatype: String,
    #[serde(default, alias = "packageName", deserialize_with = "null_as_default")]
    pub package_name: String,
    #[serde(default, alias = "thumpUrl")]
    pub thump_url: Option<String>,
    #[serde(default, alias = "thumpFilter")]
    pub thump_filter: Option<String>,
    #[serde(default, alias = "filterName", deserialize_with = "null_as_default")]
    pub filter_name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub username: String,
    #[serde(default, alias = "textDes", deserialize_with = "null_as_default")]
    pub text_des: String,
    #[serde(default, alias = "imgOptionUrl", deserialize_with = "null_as_default")]
    pub img_option_url: Vec<String>,
    #[serde(default, alias = "imgResultUrl", deserialize_with = "null_as_default")]
    pub img_result_url: Vec<String>,
}

impl ChallengeEntity {
    /// A challenge with only a name; every other field empty.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: 0,
            name: name.into(),
            category: String::new(),
            image_url: Vec::new(),
            image_url_new: Vec::new(),
            tab: String::new(),
            level: 0,
            step: 0,
            mediatype: String::new(),
            package_name: String::new(),
            thump_url: None,
            thump_filter: None,
            filter_name: String::new(),
            username: String::new(),
            text_des: String::new(),
            img_option_url: Vec::new(),
            img_result_url: Vec::new(),
        }
    }
}

/// An image reference with its moderation status.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageUrl {
    pub url: String,
    #[serde(default)]
    pub status: i64,
}

/// Response envelope wrapping every payload from the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<i64>,
    #[serde(default, rename = "totalResults", skip_serializing_if = "Option::is_none")]
    pub total_results: Option<i64>,
    #[serde(default = "none")]
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

// `#[serde(default)]` on `Option<T>` would require `T: Default`.
fn none<T>() -> Option<T> {
    None
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snake_case_record_decodes() {
        let json = r#"{
            "id": 7,
            "name": "Zombie",
            "category": "Ranking",
            "image_url": ["https://x/1.jpg"],
            "image_url_new": [{"url": "https://x/2.jpg", "status": 1}],
            "tab": "hot",
            "level": 2,
            "step": 3,
            "mediatype": "image",
            "package_name": "pkg",
            "thump_url": "https://x/a.jpg",
            "thump_filter": "https://x/b.jpg",
            "filter_name": "zombie",
            "username": "dk",
            "text_des": "desc",
            "img_option_url": [],
            "img_result_url": ["https://x/r.jpg"]
        }"#;
        let entity: ChallengeEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.id, 7);
        assert_eq!(entity.category, "Ranking");
        assert_eq!(entity.image_url_new[0].status, 1);
        assert_eq!(entity.thump_url.as_deref(), Some("https://x/a.jpg"));
        assert_eq!(entity.img_result_url.len(), 1);
    }

    #[test]
    fn camel_case_aliases_are_accepted() {
        let json = r#"{"name":"Zombie","thumpUrl":"https://x/a.jpg","thumpFilter":"https://x/b.jpg"}"#;
        let entity: ChallengeEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity.name, "Zombie");
        assert_eq!(entity.thump_url.as_deref(), Some("https://x/a.jpg"));
        assert_eq!(entity.thump_filter.as_deref(), Some("https://x/b.jpg"));
    }

    #[test]
    fn nulls_decode_to_defaults() {
        let json = r#"{"name":"n","category":null,"image_url":null,"level":null,"thump_url":null}"#;
        let entity: ChallengeEntity = serde_json::from_str(json).unwrap();
        assert_eq!(entity, ChallengeEntity::named("n"));
    }

    #[test]
    fn name_is_required() {
        let result: Result<ChallengeEntity, _> = serde_json::from_str(r#"{"id":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn envelope_without_data_decodes_to_none() {
        let env: ApiResponse<Vec<ChallengeEntity>> =
            serde_json::from_str(r#"{"status":200,"message":"ok"}"#).unwrap();
        assert!(env.data.is_none());
        assert_eq!(env.status, Some(200));
        assert_eq!(env.message.as_deref(), Some("ok"));
    }

    #[test]
    fn envelope_reads_total_results_in_camel_case() {
        let env: ApiResponse<Vec<ChallengeEntity>> =
            serde_json::from_str(r#"{"totalResults":3,"data":[]}"#).unwrap();
        assert_eq!(env.total_results, Some(3));
        assert_eq!(env.data, Some(Vec::new()));
    }
}
