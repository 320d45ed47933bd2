//! Page content and section layout.
//!
//! Content is fixed for the lifetime of a page view. Sections stack
//! vertically, each taking one full viewport of rows, so the page scrolls
//! one screen per section.

use crate::viewport::{Region, RegionBounds};

/// One entry in the project gallery.
#[derive(Clone, Debug)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Card in the about section.
#[derive(Clone, Debug)]
pub struct ServiceCard {
    pub title: String,
    pub description: String,
}

/// Everything the page displays.
#[derive(Clone, Debug)]
pub struct PageContent {
    pub intro: String,
    pub services: Vec<ServiceCard>,
    pub projects: Vec<Project>,
    pub contact_lines: Vec<String>,
    pub resume_url: String,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            intro: "Hi, I'm Christian! I build apps and website :D".to_string(),
            services: vec![
                ServiceCard {
                    title: "Front-end Development".to_string(),
                    description: "I specialize in creating responsive and interactive user \
                                  interfaces using modern web technologies."
                        .to_string(),
                },
                ServiceCard {
                    title: "UI/UX Design".to_string(),
                    description: "I design intuitive and engaging user experiences that make \
                                  applications both beautiful and functional."
                        .to_string(),
                },
                ServiceCard {
                    title: "Mobile Development".to_string(),
                    description: "I build cross-platform mobile applications that deliver \
                                  native-like experiences."
                        .to_string(),
                },
            ],
            projects: vec![
                Project {
                    title: "Project 1".to_string(),
                    description: "A responsive web application built with React and TypeScript."
                        .to_string(),
                    url: "https://example.com/project-one".to_string(),
                },
                Project {
                    title: "Project 2".to_string(),
                    description: "A mobile app developed using React Native and Firebase."
                        .to_string(),
                    url: "https://example.com/project-two".to_string(),
                },
            ],
            contact_lines: vec![
                "email    hello@example.dev".to_string(),
                "github   github.com/christian".to_string(),
                "linkedin linkedin.com/in/christian".to_string(),
            ],
            resume_url: "https://example.com/Alejandro_CV.pdf".to_string(),
        }
    }
}

/// Where each section sits in page rows.
#[derive(Clone, Debug)]
pub struct PageLayout {
    sections: Vec<RegionBounds>,
    pub total_height: usize,
}

impl PageLayout {
    /// Stack every region at one full viewport of rows each.
    pub fn stacked(viewport_height: usize) -> Self {
        let height = viewport_height.max(1);
        let sections = Region::ALL
            .iter()
            .enumerate()
            .map(|(i, &region)| RegionBounds {
                region,
                top: i * height,
                height,
            })
            .collect::<Vec<_>>();
        Self {
            sections,
            total_height: height * Region::ALL.len(),
        }
    }

    pub fn sections(&self) -> &[RegionBounds] {
        &self.sections
    }

    pub fn bounds(&self, region: Region) -> Option<RegionBounds> {
        self.sections.iter().copied().find(|b| b.region == region)
    }

    /// Largest scroll offset that still fills the viewport.
    pub fn max_scroll(&self, viewport_height: usize) -> usize {
        self.total_height.saturating_sub(viewport_height)
    }
}
