use serde::{Deserialize, Serialize};

/// A community story shown on the public site.
///
/// Absent fields coerce to empty strings/arrays on deserialization; the only
/// field with real rules is `slug`, which is derived from the title when the
/// admin form leaves it blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Story {
    pub slug: String,
    pub title: String,
    pub excerpt: String,
    pub body: String,
    pub author: String,
    pub category: String,
    pub time: String,
    pub status: String,
    pub image_url: String,
    pub pdf_url: String,
    pub tags: Vec<String>,
}

impl Story {
    /// Normalize the slug in place, deriving it from the title when empty.
    /// A slug that still normalizes to nothing falls back to the first sample
    /// story's slug so it is never empty.
    pub fn ensure_slug(&mut self) {
        let source = if self.slug.trim().is_empty() {
            &self.title
        } else {
            &self.slug
        };
        let mut slug = normalize_slug(source);
        if slug.is_empty() {
            slug = samples()[0].slug.clone();
        }
        self.slug = slug;
    }
}

/// Lowercase, collapse runs of non-alphanumerics into single hyphens, and trim
/// hyphens from both ends. Idempotent.
pub fn normalize_slug(input: &str) -> String {
    let mut slug = String::with_capacity(input.len());
    let mut pending_hyphen = false;
    for c in input.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }
    slug
}

/// The stories the site ships with before anything has been saved.
pub fn samples() -> Vec<Story> {
    vec![
        Story {
            slug: "from-trash-to-treasure".into(),
            title: "From Trash to Treasure: Rebuilding My First PC".into(),
            excerpt: "Maya pulled a tower out of a curbside pile and turned it into her \
                      homework machine. Here is how the rebuild went."
                .into(),
            body: "The case was scratched and the fans were full of dust, but the board \
                   posted on the first try. Over two weekend workshops we swapped the \
                   power supply, added a donated SSD, and installed Linux. Total cost: \
                   eleven dollars in thermal paste and screws.\n\nThe machine now lives \
                   on Maya's desk and handles everything a high schooler throws at it. \
                   The pile it came from went to the county recycler - but only after we \
                   pulled three more rescues out of it."
                .into(),
            author: "Maya Chen".into(),
            category: "Repair".into(),
            time: "6 min read".into(),
            status: "published".into(),
            image_url: "/images/stories/first-pc.jpg".into(),
            pdf_url: String::new(),
            tags: vec!["repair".into(), "beginners".into(), "workshop".into()],
        },
        Story {
            slug: "the-library-laptop-drive".into(),
            title: "The Library Laptop Drive".into(),
            excerpt: "Forty retired office laptops, one branch library, and a Saturday \
                      of wiping drives and fitting batteries."
                .into(),
            body: "When a local firm refreshed its fleet, the old machines were headed \
                   for a shredder. We intercepted them, securely wiped every drive, and \
                   spent a Saturday at the Eastside branch replacing swollen batteries \
                   and missing keys.\n\nThirty-one laptops passed checkout and joined \
                   the library's lending program. The other nine became parts donors - \
                   nothing was wasted."
                .into(),
            author: "DeShawn Carter".into(),
            category: "Community".into(),
            time: "4 min read".into(),
            status: "published".into(),
            image_url: "/images/stories/library-drive.jpg".into(),
            pdf_url: String::new(),
            tags: vec!["community".into(), "donation".into()],
        },
        Story {
            slug: "what-happens-to-your-old-phone".into(),
            title: "What Happens to Your Old Phone?".into(),
            excerpt: "The journey of a traded-in phone, from the kitchen drawer to the \
                      smelter - and the detours that keep it alive longer."
                .into(),
            body: "Most phones spend two years in a drawer before anyone decides their \
                   fate. From there the paths diverge: resale, parts harvesting, or the \
                   shredder. Each step down that list recovers less of the energy and \
                   material that went into the device.\n\nThis piece walks through each \
                   stage with numbers from our county program, and ends with the \
                   checklist we hand out at every workshop: back up, wipe, unlock, and \
                   only then let it go."
                .into(),
            author: "Priya Natarajan".into(),
            category: "Education".into(),
            time: "8 min read".into(),
            status: "published".into(),
            image_url: "/images/stories/old-phone.jpg".into(),
            pdf_url: String::new(),
            tags: vec!["education".into(), "recycling".into()],
        },
    ]
}
