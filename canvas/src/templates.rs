//! Built-in starter resumes.
//!
//! Each template is a fixed persona laid out as a name line, a contact block,
//! one experience entry and a skill list. [`Template::instantiate`] produces
//! fresh elements every time, ready for [`crate::engine::EngineCore::load_document`].

#[cfg(test)]
#[path = "templates_test.rs"]
mod templates_test;

use crate::content::{ContactContent, ElementContent, ExperienceContent, FontWeight, SkillContent, TextContent};
use crate::doc::{Element, ElementId};
use crate::geometry::{Point, Size};

struct Persona {
    name: &'static str,
    phone: &'static str,
    email: &'static str,
    location: &'static str,
    website: &'static str,
    title: &'static str,
    company: &'static str,
    start: &'static str,
    summary: &'static str,
    skills: &'static [&'static str],
}

pub struct Template {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    persona: Persona,
}

pub static TEMPLATES: [Template; 3] = [
    Template {
        id: "software-engineer",
        name: "Software Engineer",
        description: "Professional template for software developers",
        persona: Persona {
            name: "John Doe",
            phone: "+1 (555) 123-4567",
            email: "john.doe@email.com",
            location: "San Francisco, CA",
            website: "https://johndoe.dev",
            title: "Senior Software Engineer",
            company: "Tech Company Inc.",
            start: "2020",
            summary: "Led development of scalable web applications using React, Node.js, and AWS. \
                      Mentored junior developers and improved team productivity by 30%.",
            skills: &["JavaScript", "TypeScript", "React", "Node.js", "AWS", "Docker"],
        },
    },
    Template {
        id: "marketing-manager",
        name: "Marketing Manager",
        description: "Template for marketing professionals",
        persona: Persona {
            name: "Jane Smith",
            phone: "+1 (555) 987-6543",
            email: "jane.smith@email.com",
            location: "New York, NY",
            website: "https://janesmith.com",
            title: "Marketing Manager",
            company: "Digital Agency",
            start: "2019",
            summary: "Developed and executed marketing campaigns that increased brand awareness by 150%. \
                      Managed a team of 5 marketing specialists.",
            skills: &["Digital Marketing", "SEO", "Social Media", "Analytics", "Team Leadership"],
        },
    },
    Template {
        id: "data-scientist",
        name: "Data Scientist",
        description: "Template for data science professionals",
        persona: Persona {
            name: "Alex Johnson",
            phone: "+1 (555) 456-7890",
            email: "alex.johnson@email.com",
            location: "Seattle, WA",
            website: "https://alexjohnson.ai",
            title: "Senior Data Scientist",
            company: "AI Solutions Corp",
            start: "2021",
            summary: "Built machine learning models that improved business outcomes by 40%. \
                      Led data science initiatives across multiple product teams.",
            skills: &["Python", "Machine Learning", "TensorFlow", "SQL", "Statistics", "Deep Learning"],
        },
    },
];

/// Look up a template by id.
#[must_use]
pub fn template(id: &str) -> Option<&'static Template> {
    TEMPLATES.iter().find(|t| t.id == id)
}

impl Template {
    /// Fresh elements for this template, each with a new id.
    #[must_use]
    pub fn instantiate(&self) -> Vec<Element> {
        let p = &self.persona;
        vec![
            placed(
                ElementContent::Text(TextContent {
                    text: p.name.into(),
                    font_size: 24.0,
                    font_weight: FontWeight::Bold,
                    ..TextContent::default()
                }),
                (20.0, 20.0),
                (200.0, 30.0),
            ),
            placed(
                ElementContent::Contact(ContactContent {
                    phone: p.phone.into(),
                    email: p.email.into(),
                    location: p.location.into(),
                    website: p.website.into(),
                    ..ContactContent::default()
                }),
                (20.0, 60.0),
                (200.0, 80.0),
            ),
            placed(
                ElementContent::Experience(ExperienceContent {
                    title: p.title.into(),
                    company: p.company.into(),
                    location: p.location.into(),
                    start_date: p.start.into(),
                    end_date: "Present".into(),
                    description: p.summary.into(),
                    current: true,
                }),
                (20.0, 160.0),
                (300.0, 120.0),
            ),
            placed(
                ElementContent::Skill(SkillContent { skills: p.skills.iter().map(|s| (*s).to_owned()).collect() }),
                (20.0, 300.0),
                (200.0, 80.0),
            ),
        ]
    }
}

fn placed(content: ElementContent, (x, y): (f64, f64), (width, height): (f64, f64)) -> Element {
    Element {
        id: ElementId::generate(),
        content,
        position: Point::new(x, y),
        size: Size::new(width, height),
        rotation: 0.0,
    }
}
