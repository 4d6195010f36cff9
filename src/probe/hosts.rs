//! Host classification for the external-link probe.
//!
//! Social networks, messaging platforms, and theme/plugin infrastructure
//! domains never count as qualifying outbound links; neither do staging
//! hosts. The lists are fixed and shared read-only across all workers.

use url::Url;

/// Hosts (and their subdomains) that never qualify as external links.
pub const IGNORE_HOSTS: &[&str] = &[
    "facebook.com",
    "x.com",
    "twitter.com",
    "instagram.com",
    "pinterest.com",
    "linkedin.com",
    "tumblr.com",
    "reddit.com",
    "threads.net",
    "whatsapp.com",
    "wa.me",
    "api.whatsapp.com",
    "web.whatsapp.com",
    "t.me",
    "telegram.me",
    "telegram.org",
    "discord.com",
    "youtube.com",
    "youtu.be",
    "tiktok.com",
    "messenger.com",
    "skype.com",
    "viber.com",
    "line.me",
    "vk.com",
    "ok.ru",
    "weibo.com",
    "qq.com",
    "google.com",
    "theme-sphere.com",
    "wordpress.org",
    "addtoany.com",
    "getpocket.com",
    "demo.mythemeshop.com",
];

/// Host suffixes that never qualify (staging platforms).
pub const IGNORE_SUFFIXES: &[&str] = &[".stackstaging.com"];

/// Schemes and pseudo-links that are skipped before any host resolution.
const SKIP_PREFIXES: &[&str] = &["#", "mailto:", "tel:", "javascript:", "data:"];

/// WhatsApp message-link variants, skipped in full.
const WA_ME_PREFIXES: &[&str] = &["https://wa.me/", "http://wa.me/", "//wa.me/"];

/// Lowercase a host and strip a single leading `www.`.
pub fn normalize_host(host: &str) -> String {
    let lower = host.to_lowercase();
    lower.strip_prefix("www.").unwrap_or(&lower).to_string()
}

/// Resolve the normalised host of an absolute or protocol-relative href.
///
/// Returns `None` for relative links and unparseable URLs.
pub fn extract_host(href: &str) -> Option<String> {
    let href = href.trim();
    let absolute = if let Some(rest) = href.strip_prefix("//") {
        format!("http://{rest}")
    } else {
        href.to_string()
    };
    if !absolute.starts_with("http://") && !absolute.starts_with("https://") {
        return None;
    }
    let parsed = Url::parse(&absolute).ok()?;
    parsed.host_str().map(normalize_host)
}

/// Whether the href points at an absolute or protocol-relative URL.
pub fn is_absolute_capable(href: &str) -> bool {
    href.starts_with("http://") || href.starts_with("https://") || href.starts_with("//")
}

/// Whether the href is a fragment, non-HTTP scheme, or wa.me message link.
pub fn is_skippable(href: &str) -> bool {
    SKIP_PREFIXES.iter().any(|p| href.starts_with(p))
        || WA_ME_PREFIXES.iter().any(|p| href.starts_with(p))
}

/// Whether a normalised host is on the ignore list (exact or subdomain) or
/// carries an ignored suffix.
pub fn is_ignored_host(host: &str) -> bool {
    IGNORE_HOSTS
        .iter()
        .any(|ignored| host == *ignored || host.ends_with(&format!(".{ignored}")))
        || IGNORE_SUFFIXES.iter().any(|suffix| host.ends_with(suffix))
}

/// Whether `link_host` is the page's own host or one of its subdomains.
pub fn is_internal(link_host: &str, page_host: &str) -> bool {
    link_host == page_host || link_host.ends_with(&format!(".{page_host}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_strips_www() {
        assert_eq!(normalize_host("WWW.Example.COM"), "example.com");
        assert_eq!(normalize_host("example.com"), "example.com");
    }

    #[test]
    fn normalize_strips_only_one_www() {
        assert_eq!(normalize_host("www.www.example.com"), "www.example.com");
    }

    #[test]
    fn normalize_does_not_eat_w_prefixes() {
        // A host that merely starts with w characters is left alone.
        assert_eq!(normalize_host("ww2.example.com"), "ww2.example.com");
        assert_eq!(normalize_host("wwwexample.com"), "wwwexample.com");
    }

    #[test]
    fn extract_host_absolute() {
        assert_eq!(
            extract_host("https://www.Example.com/page"),
            Some("example.com".into())
        );
    }

    #[test]
    fn extract_host_protocol_relative() {
        assert_eq!(
            extract_host("//cdn.example.com/lib.js"),
            Some("cdn.example.com".into())
        );
    }

    #[test]
    fn extract_host_relative_is_none() {
        assert_eq!(extract_host("/about/"), None);
        assert_eq!(extract_host("page.html"), None);
    }

    #[test]
    fn extract_host_garbage_is_none() {
        assert_eq!(extract_host("http://"), None);
    }

    #[test]
    fn skippable_prefixes() {
        for href in [
            "#top",
            "mailto:info@example.com",
            "tel:+15551234567",
            "javascript:void(0)",
            "data:text/plain;base64,SGk=",
            "https://wa.me/15551234567",
            "//wa.me/15551234567",
        ] {
            assert!(is_skippable(href), "{href} should be skippable");
        }
        assert!(!is_skippable("https://example.com/"));
    }

    #[test]
    fn ignored_exact_and_subdomain() {
        assert!(is_ignored_host("facebook.com"));
        assert!(is_ignored_host("m.facebook.com"));
        assert!(is_ignored_host("google.com"));
        assert!(!is_ignored_host("notfacebook.com"));
    }

    #[test]
    fn ignored_suffix() {
        assert!(is_ignored_host("mysite.stackstaging.com"));
        assert!(!is_ignored_host("stackstaging.org"));
    }

    #[test]
    fn internal_same_host_and_subdomain() {
        assert!(is_internal("example.com", "example.com"));
        assert!(is_internal("blog.example.com", "example.com"));
        assert!(!is_internal("example.org", "example.com"));
        assert!(!is_internal("badexample.com", "example.com"));
    }

    #[test]
    fn absolute_capable_prefixes() {
        assert!(is_absolute_capable("http://a.test/"));
        assert!(is_absolute_capable("https://a.test/"));
        assert!(is_absolute_capable("//a.test/"));
        assert!(!is_absolute_capable("/relative"));
        assert!(!is_absolute_capable("page.html"));
    }
}
