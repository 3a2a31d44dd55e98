use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareLinkError {
    #[error("Invalid share link: missing {0}")]
    MissingSegment(&'static str),
}

/// Identifies a shared ledger or pot from a `/share/<id>/<token>` path.
///
/// The token is carried as-is; checking it against the stored one is the
/// document store's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
    pub ledger_id: String,
    pub token: String,
}

impl ShareLink {
    pub fn parse(path: &str) -> Result<Self, ShareLinkError> {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let mut segments = path.split('/').skip(2);

        let ledger_id = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or(ShareLinkError::MissingSegment("ledger id"))?;
        let token = segments
            .next()
            .filter(|segment| !segment.is_empty())
            .ok_or(ShareLinkError::MissingSegment("share token"))?;

        Ok(Self {
            ledger_id: ledger_id.to_string(),
            token: token.to_string(),
        })
    }
}
