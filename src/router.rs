use rand::Rng;

use crate::pages::{self, LineSample, PieSample};

pub const WORLD_CUP_PATH: &str = "/world_cup";
pub const PAGE2_PATH: &str = "/page2";
pub const PAGE3_PATH: &str = "/page3";

/// Navigation bar entries, in display order.
pub const NAV_LINKS: [(&str, &str); 3] = [
    ("World Cup", WORLD_CUP_PATH),
    ("Page 2", PAGE2_PATH),
    ("Page 3", PAGE3_PATH),
];

pub const NOT_FOUND: &str = "404";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Page<'a> {
    WorldCup,
    Pie(&'a PieSample),
    Line(&'a LineSample),
    NotFound,
}

/// Content of the two static pages, built once at startup.
#[derive(Debug, Clone)]
pub struct Pages {
    pie: PieSample,
    line: LineSample,
}

impl Pages {
    pub fn build<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            pie: pages::country_shares(),
            line: pages::random_walk(rng),
        }
    }

    pub fn route(&self, path: &str) -> Page<'_> {
        match path {
            WORLD_CUP_PATH => Page::WorldCup,
            PAGE2_PATH => Page::Pie(&self.pie),
            PAGE3_PATH => Page::Line(&self.line),
            _ => Page::NotFound,
        }
    }
}

/// Index into `NAV_LINKS` of the active tab, if the path is a known page.
pub fn nav_index(path: &str) -> Option<usize> {
    NAV_LINKS.iter().position(|(_, href)| *href == path)
}
