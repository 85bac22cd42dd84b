use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Site-wide editable copy, one named section per admin screen.
///
/// Known sections carry compiled-in defaults (see [`defaults`]); keys this
/// build does not know about land in `extra` and survive load/save round
/// trips untouched. Missing fields inside a saved section coerce to empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SiteData {
    pub hero: Hero,
    pub stats: Vec<Stat>,
    pub team: Vec<TeamMember>,
    pub contact: Contact,
    pub slideshows: BTreeMap<String, Vec<String>>,
    pub nav: Vec<NavItem>,
    pub gallery: Gallery,
    pub submission_cta: SubmissionCta,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Hero {
    pub heading: String,
    pub message: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Stat {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TeamMember {
    pub name: String,
    pub role: String,
    pub bio: String,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub address: String,
    pub instagram: String,
    pub discord: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct NavItem {
    pub label: String,
    pub href: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Gallery {
    pub layout: String,
    pub images: Vec<GalleryImage>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GalleryImage {
    pub url: String,
    pub caption: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SubmissionCta {
    pub heading: String,
    pub body: String,
    pub button_label: String,
    pub form_url: String,
}

/// A partial admin save: each present section replaces the stored one
/// wholesale, absent sections keep their current value.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SitePatch {
    pub hero: Option<Hero>,
    pub stats: Option<Vec<Stat>>,
    pub team: Option<Vec<TeamMember>>,
    pub contact: Option<Contact>,
    pub slideshows: Option<BTreeMap<String, Vec<String>>>,
    pub nav: Option<Vec<NavItem>>,
    pub gallery: Option<Gallery>,
    pub submission_cta: Option<SubmissionCta>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl SiteData {
    /// Merge a patch over this data, section by section.
    pub fn apply(&mut self, patch: SitePatch) {
        if let Some(hero) = patch.hero {
            self.hero = hero;
        }
        if let Some(stats) = patch.stats {
            self.stats = stats;
        }
        if let Some(team) = patch.team {
            self.team = team;
        }
        if let Some(contact) = patch.contact {
            self.contact = contact;
        }
        if let Some(slideshows) = patch.slideshows {
            self.slideshows = slideshows;
        }
        if let Some(nav) = patch.nav {
            self.nav = nav;
        }
        if let Some(gallery) = patch.gallery {
            self.gallery = gallery;
        }
        if let Some(submission_cta) = patch.submission_cta {
            self.submission_cta = submission_cta;
        }
        for (key, value) in patch.extra {
            self.extra.insert(key, value);
        }
    }

    /// Compiled-in defaults merged with whatever a storage tier held.
    pub fn from_patch(patch: SitePatch) -> Self {
        let mut data = defaults();
        data.apply(patch);
        data
    }
}

/// The copy the site ships with before anything has been saved.
pub fn defaults() -> SiteData {
    SiteData {
        hero: Hero {
            heading: "Give Your Electronics a Second Life".into(),
            message: "We teach repair, run community drives, and keep working devices \
                      out of the shredder."
                .into(),
            image_url: "/images/hero.jpg".into(),
        },
        stats: vec![
            Stat {
                label: "Devices rescued".into(),
                value: "1,200+".into(),
            },
            Stat {
                label: "Workshops held".into(),
                value: "85".into(),
            },
            Stat {
                label: "Pounds kept out of landfill".into(),
                value: "9,400".into(),
            },
        ],
        team: vec![
            TeamMember {
                name: "Maya Chen".into(),
                role: "Founder & repair lead".into(),
                bio: "Started fixing phones at her family's kitchen table; now runs our \
                      weekend repair clinics."
                    .into(),
                image_url: "/images/team/maya.jpg".into(),
            },
            TeamMember {
                name: "DeShawn Carter".into(),
                role: "Donations coordinator".into(),
                bio: "Keeps the intake shelf organized and every donated laptop \
                      accounted for."
                    .into(),
                image_url: "/images/team/deshawn.jpg".into(),
            },
        ],
        contact: Contact {
            email: "hello@rewired.community".into(),
            phone: String::new(),
            address: "Eastside Makerspace, 4th & Pine".into(),
            instagram: "@rewired.community".into(),
            discord: String::new(),
        },
        slideshows: BTreeMap::from([("home".to_string(), Vec::new())]),
        nav: vec![
            NavItem {
                label: "Home".into(),
                href: "/".into(),
            },
            NavItem {
                label: "Stories".into(),
                href: "/stories".into(),
            },
            NavItem {
                label: "DIY Guides".into(),
                href: "/diy".into(),
            },
            NavItem {
                label: "Gallery".into(),
                href: "/gallery".into(),
            },
            NavItem {
                label: "Team".into(),
                href: "/team".into(),
            },
            NavItem {
                label: "Contact".into(),
                href: "/contact".into(),
            },
        ],
        gallery: Gallery {
            layout: "grid".into(),
            images: Vec::new(),
        },
        submission_cta: SubmissionCta {
            heading: "Got a rescue story?".into(),
            body: "Tell us about the device you brought back from the dead - we feature \
                   a community story every month."
                .into(),
            button_label: "Share your story".into(),
            form_url: "/stories/submit".into(),
        },
        extra: BTreeMap::new(),
    }
}
