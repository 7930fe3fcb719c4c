use docsbot_core::config::DocsSettings;
use docsbot_core::types::{Embed, EmbedField, Reply};

pub const SITE_TITLE: &str = "Fosscord Documentation";
pub const SITE_DESCRIPTION: &str =
    "Fosscord is a free and open source, selfhostable, Discord.com-compatible chat platform.";

/// Landing links shown when no query is given: (label, path under the base URL).
pub const LANDING_LINKS: [(&str, &str); 6] = [
    ("FAQ", "faq"),
    ("Server Setup", "server/setup"),
    ("Reverse Proxies", "setup/server/reverseProxy"),
    ("Configuration", "setup/server/configuration"),
    ("Security", "setup/server/security/"),
    ("Contributing", "contributing"),
];

/// The reply for an empty query. Needs no network.
pub fn landing_reply(settings: &DocsSettings) -> Reply {
    Reply::Embed(Embed {
        title: SITE_TITLE.to_string(),
        url: settings.base_url.clone(),
        description: SITE_DESCRIPTION.to_string(),
        fields: LANDING_LINKS
            .iter()
            .map(|(name, path)| EmbedField::link(*name, &settings.doc_url(path)))
            .collect(),
        footer: None,
    })
}
