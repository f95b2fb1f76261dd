//! Graph API response bodies.

use insightgen_core::{PublishIdentity, PublishReceipt, PublishTarget};
use serde::Deserialize;

/// `GET /me?fields=name,id,picture`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct MeJson {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: Option<PictureJson>,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PictureJson {
    pub data: PictureDataJson,
}

#[derive(Debug, Clone, Deserialize)]
pub(crate) struct PictureDataJson {
    #[serde(default)]
    pub url: Option<String>,
}

impl From<MeJson> for PublishIdentity {
    fn from(me: MeJson) -> Self {
        let avatar_url = me.picture.and_then(|p| p.data.url);
        PublishIdentity::new(me.id, me.name, avatar_url)
    }
}

/// `GET /{user}/accounts?fields=name,access_token,id,category`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct AccountsJson {
    #[serde(default)]
    pub data: Vec<PageJson>,
}

#[derive(Clone, Deserialize)]
pub(crate) struct PageJson {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub access_token: String,
    #[serde(default)]
    pub category: String,
}

impl std::fmt::Debug for PageJson {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageJson")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("category", &self.category)
            .finish_non_exhaustive()
    }
}

impl From<PageJson> for PublishTarget {
    fn from(page: PageJson) -> Self {
        PublishTarget::new(page.id, page.name, page.access_token, page.category)
    }
}

/// `POST /{page}/photos` and `POST /{page}/feed`
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct CreatedJson {
    pub id: String,
    #[serde(default)]
    pub post_id: Option<String>,
}

impl From<CreatedJson> for PublishReceipt {
    fn from(created: CreatedJson) -> Self {
        PublishReceipt::new(created.id, created.post_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_takes_nested_picture_url() {
        let me: MeJson = serde_json::from_str(
            r#"{"id":"42","name":"Ada","picture":{"data":{"url":"https://cdn.example/a.jpg","is_silhouette":false}}}"#,
        )
        .unwrap();
        let identity = PublishIdentity::from(me);
        assert_eq!(identity.id(), "42");
        assert_eq!(
            identity.avatar_url().as_deref(),
            Some("https://cdn.example/a.jpg")
        );
    }

    #[test]
    fn page_without_category_still_parses() {
        let accounts: AccountsJson = serde_json::from_str(
            r#"{"data":[{"id":"1","name":"Page","access_token":"tok"}],"paging":{}}"#,
        )
        .unwrap();
        let target = PublishTarget::from(accounts.data[0].clone());
        assert_eq!(target.category(), "");
        assert_eq!(target.access_token(), "tok");
    }
}
