use anyhow::Result;
use url::Url;

/// Read-only view of the mail identifier the current location may carry.
pub trait UrlParams {
    fn mail_ident(&self) -> Option<String>;

    fn has_mail_ident(&self) -> bool {
        self.mail_ident().is_some()
    }
}

/// Location parameters from a `/#/<tag>/mail/<ident>` fragment.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct HashParams {
    tag: Option<String>,
    ident: Option<String>,
}

impl HashParams {
    pub fn parse(raw: &str) -> Result<Self> {
        Ok(Self::from_url(&Url::parse(raw)?))
    }

    pub fn from_url(url: &Url) -> Self {
        match url.fragment() {
            Some(fragment) => Self::from_fragment(fragment),
            None => Self::default(),
        }
    }

    fn from_fragment(fragment: &str) -> Self {
        let parts: Vec<&str> = fragment.trim_start_matches('/').split('/').collect();
        match parts.as_slice() {
            [tag, "mail", ident] if !tag.is_empty() && !ident.is_empty() => Self {
                tag: Some((*tag).to_string()),
                ident: Some((*ident).to_string()),
            },
            [tag] if !tag.is_empty() => Self {
                tag: Some((*tag).to_string()),
                ident: None,
            },
            _ => Self::default(),
        }
    }

    pub fn tag(&self) -> Option<&str> {
        self.tag.as_deref()
    }
}

impl UrlParams for HashParams {
    fn mail_ident(&self) -> Option<String> {
        self.ident.clone()
    }
}
