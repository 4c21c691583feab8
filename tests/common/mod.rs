#![allow(dead_code)]

pub mod fixtures;
pub mod page_assertions;

use docnav::{EnhanceError, EnhanceReport, EnhancerConfig, InMemoryPage, InMemoryPlatform, PageEnhancer};

pub type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Install every component with the default configuration
pub fn enhance(page: &InMemoryPage, platform: &InMemoryPlatform) -> Result<EnhanceReport, EnhanceError> {
    enhance_with(page, platform, EnhancerConfig::default())
}

/// Install every enabled component with the given configuration
pub fn enhance_with(
    page: &InMemoryPage,
    platform: &InMemoryPlatform,
    config: EnhancerConfig,
) -> Result<EnhanceReport, EnhanceError> {
    PageEnhancer::new(page.clone(), platform.clone(), config)?.install()
}
