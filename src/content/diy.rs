use serde::{Deserialize, Serialize};

/// A DIY repair/reuse guide. Steps are ordered; everything coerces to empty
/// when absent from the payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DiyProject {
    pub name: String,
    pub difficulty: String,
    pub time: String,
    pub outcome: String,
    pub materials: Vec<String>,
    pub steps: Vec<String>,
    pub safety_tips: Vec<String>,
    pub image_url: String,
    pub pdf_url: String,
}

/// Guides the site ships with before anything has been saved.
pub fn samples() -> Vec<DiyProject> {
    vec![
        DiyProject {
            name: "Cable Organizer from Old Chargers".into(),
            difficulty: "Easy".into(),
            time: "30 minutes".into(),
            outcome: "A desk organizer that tames your cable drawer, built from the \
                      chargers that filled it."
                .into(),
            materials: vec![
                "3-4 dead wall chargers".into(),
                "A shoebox or sturdy cardboard".into(),
                "Velcro ties".into(),
                "Label maker or masking tape".into(),
            ],
            steps: vec![
                "Test every charger and set aside the working ones for donation.".into(),
                "Cut the cables off the dead chargers near the brick.".into(),
                "Divide the box into slots with cardboard strips.".into(),
                "Coil each keeper cable, strap it with a velcro tie, and label the slot."
                    .into(),
            ],
            safety_tips: vec![
                "Never cut a cable that is plugged in.".into(),
                "Bricks with bulges or rattles go in the e-waste bin, not the trash.".into(),
            ],
            image_url: "/images/diy/cable-organizer.jpg".into(),
            pdf_url: String::new(),
        },
        DiyProject {
            name: "External Drive from a Retired Laptop".into(),
            difficulty: "Medium".into(),
            time: "1 hour".into(),
            outcome: "A pocket-sized backup drive rescued from a laptop that no longer \
                      boots."
                .into(),
            materials: vec![
                "A laptop with a working 2.5\" drive".into(),
                "USB drive enclosure (match SATA/NVMe)".into(),
                "Small Phillips screwdriver".into(),
            ],
            steps: vec![
                "Unplug the laptop and remove the battery if you can.".into(),
                "Open the access panel and slide the drive out of its bay.".into(),
                "Seat the drive in the enclosure and close it up.".into(),
                "Plug it into a working machine and reformat after rescuing any files."
                    .into(),
            ],
            safety_tips: vec![
                "Ground yourself before touching the drive's circuit board.".into(),
                "Puffy batteries are a fire risk - take them to a drop-off, never bin them."
                    .into(),
            ],
            image_url: "/images/diy/external-drive.jpg".into(),
            pdf_url: String::new(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn samples_have_ordered_steps() {
        for project in samples() {
            assert!(!project.name.is_empty());
            assert!(project.steps.len() >= 2);
        }
    }

    #[test]
    fn missing_fields_coerce_to_defaults() {
        let project: DiyProject = serde_json::from_str(r#"{"name": "Bare"}"#).unwrap();
        assert_eq!(project.name, "Bare");
        assert!(project.materials.is_empty());
        assert!(project.safety_tips.is_empty());
    }
}
