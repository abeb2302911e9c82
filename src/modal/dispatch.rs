//! Choosing what a `.clickable-image` trigger opens.
//!
//! The decision is made once, at activation time, from the trigger's
//! attributes, and the result is handed to [`ModalSession::open`](super::ModalSession::open):
//!
//! | Trigger carries | Opens |
//! |-----------------|-------|
//! | `data-cert-images="a.jpg, b.jpg, c.jpg"` | Gallery of those images |
//! | `data-cert-image="cert.jpg"` | Single image `cert.jpg`, alt from the trigger or its `<img>` child |
//! | neither, and the trigger is an `<img>` | Single image with the trigger's own `src`/`alt` |
//!
//! Click and Enter/Space activation use the same rule.

use crate::config::GalleryConfig;

/// One image shown in the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateImage {
    pub src: String,
    pub alt: String,
}

impl CertificateImage {
    pub fn new(src: impl Into<String>, alt: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            alt: alt.into(),
        }
    }
}

/// What to show when the modal opens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenRequest {
    Single(CertificateImage),
    Gallery(Vec<CertificateImage>),
}

/// Attribute snapshot of an activated trigger element.
#[derive(Debug, Default, Clone, Copy)]
pub struct Trigger<'a> {
    /// `data-cert-images`, when present.
    pub cert_images: Option<&'a str>,
    /// `data-cert-image`, when present.
    pub cert_image: Option<&'a str>,
    /// The trigger's own `alt` attribute.
    pub alt: Option<&'a str>,
    /// `alt` of the first `<img>` inside the trigger.
    pub child_alt: Option<&'a str>,
    /// `src` of the trigger, only when the trigger itself is an `<img>`.
    pub image_src: Option<&'a str>,
}

/// Alt text used for a single certificate with no label anywhere.
pub const DEFAULT_CERT_ALT: &str = "Certificate";

/// Classify a trigger. `None` means the element opens nothing.
pub fn classify(trigger: &Trigger<'_>, gallery: &GalleryConfig) -> Option<OpenRequest> {
    if let Some(list) = trigger.cert_images {
        return Some(OpenRequest::Gallery(gallery_images(Some(list), gallery)));
    }
    if let Some(src) = trigger.cert_image {
        let alt = non_empty(trigger.alt)
            .or(non_empty(trigger.child_alt))
            .unwrap_or(DEFAULT_CERT_ALT);
        return Some(OpenRequest::Single(CertificateImage::new(src.trim(), alt)));
    }
    let src = non_empty(trigger.image_src)?;
    Some(OpenRequest::Single(CertificateImage::new(
        src,
        trigger.alt.unwrap_or_default(),
    )))
}

/// Images for a gallery request.
///
/// Paths come from the comma-separated `list` and are labelled with
/// `gallery.alts` in order; paths beyond the labelled ones get a numbered
/// label. A missing or empty list falls back to `gallery.fallback`.
pub fn gallery_images(list: Option<&str>, gallery: &GalleryConfig) -> Vec<CertificateImage> {
    let paths: Vec<&str> = list
        .map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .collect()
        })
        .unwrap_or_default();

    if paths.is_empty() {
        tracing::warn!("certificate list missing or empty, using configured fallback paths");
        return label(gallery.fallback.iter().map(String::as_str), &gallery.alts);
    }
    label(paths.into_iter(), &gallery.alts)
}

fn label<'a>(paths: impl Iterator<Item = &'a str>, alts: &[String]) -> Vec<CertificateImage> {
    paths
        .enumerate()
        .map(|(i, src)| {
            let alt = alts
                .get(i)
                .cloned()
                .unwrap_or_else(|| format!("{DEFAULT_CERT_ALT} {}", i + 1));
            CertificateImage::new(src, alt)
        })
        .collect()
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_paths_open_gallery_of_three() {
        let trigger = Trigger {
            cert_images: Some("certs/a.jpg, certs/b.jpg ,certs/c.jpg"),
            ..Default::default()
        };
        let Some(OpenRequest::Gallery(images)) = classify(&trigger, &GalleryConfig::default())
        else {
            panic!("expected gallery");
        };
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].src, "certs/a.jpg");
        assert_eq!(images[1].src, "certs/b.jpg");
        assert_eq!(images[2].alt, "Harvard Real Estate Investment Certificate");
    }

    #[test]
    fn gallery_attribute_wins_over_single() {
        let trigger = Trigger {
            cert_images: Some("a.jpg,b.jpg,c.jpg"),
            cert_image: Some("single.jpg"),
            image_src: Some("logo.png"),
            ..Default::default()
        };
        assert!(matches!(
            classify(&trigger, &GalleryConfig::default()),
            Some(OpenRequest::Gallery(_))
        ));
    }

    #[test]
    fn empty_list_uses_fallback_paths() {
        let trigger = Trigger {
            cert_images: Some(" , "),
            ..Default::default()
        };
        let Some(OpenRequest::Gallery(images)) = classify(&trigger, &GalleryConfig::default())
        else {
            panic!("expected gallery");
        };
        assert_eq!(images.len(), 3);
        assert_eq!(images[0].src, "assets/certs/Harvard Strategic Management.jpg");
    }

    #[test]
    fn extra_paths_get_numbered_alts() {
        let images = gallery_images(Some("a,b,c,d"), &GalleryConfig::default());
        assert_eq!(images.len(), 4);
        assert_eq!(images[3].alt, "Certificate 4");
    }

    #[test]
    fn short_list_keeps_what_it_has() {
        let images = gallery_images(Some("only.jpg"), &GalleryConfig::default());
        assert_eq!(
            images,
            vec![CertificateImage::new(
                "only.jpg",
                "Harvard Strategic Management Certificate"
            )]
        );
    }

    #[test]
    fn single_override_uses_own_alt() {
        let trigger = Trigger {
            cert_image: Some("certs/pmp.jpg"),
            alt: Some("PMP logo"),
            child_alt: Some("ignored"),
            image_src: Some("logos/pmp.png"),
            ..Default::default()
        };
        assert_eq!(
            classify(&trigger, &GalleryConfig::default()),
            Some(OpenRequest::Single(CertificateImage::new(
                "certs/pmp.jpg",
                "PMP logo"
            )))
        );
    }

    #[test]
    fn single_override_falls_back_to_child_alt_then_default() {
        let card = Trigger {
            cert_image: Some("certs/pmp.jpg"),
            alt: Some(""),
            child_alt: Some("PMP badge"),
            ..Default::default()
        };
        let Some(OpenRequest::Single(img)) = classify(&card, &GalleryConfig::default()) else {
            panic!("expected single");
        };
        assert_eq!(img.alt, "PMP badge");

        let bare = Trigger {
            cert_image: Some("certs/pmp.jpg"),
            ..Default::default()
        };
        let Some(OpenRequest::Single(img)) = classify(&bare, &GalleryConfig::default()) else {
            panic!("expected single");
        };
        assert_eq!(img.alt, DEFAULT_CERT_ALT);
    }

    #[test]
    fn plain_image_opens_itself() {
        let trigger = Trigger {
            alt: Some("Portrait"),
            image_src: Some("https://site/img/me.jpg"),
            ..Default::default()
        };
        assert_eq!(
            classify(&trigger, &GalleryConfig::default()),
            Some(OpenRequest::Single(CertificateImage::new(
                "https://site/img/me.jpg",
                "Portrait"
            )))
        );
    }

    #[test]
    fn non_image_without_attributes_opens_nothing() {
        assert_eq!(classify(&Trigger::default(), &GalleryConfig::default()), None);
        let empty_src = Trigger {
            image_src: Some(""),
            ..Default::default()
        };
        assert_eq!(classify(&empty_src, &GalleryConfig::default()), None);
    }
}
