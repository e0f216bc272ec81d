use crate::routes::SectionGuard;
use dioxus::prelude::*;
use shared_types::navigation::label_for_path;
use shared_ui::{Card, CardContent, CardDescription, CardHeader, CardTitle, PageHeader, PageTitle};

/// Any dashboard section other than home and profile. The guard decides
/// whether the current role may open it.
#[component]
pub fn DashboardSection(section: String) -> Element {
    let path = format!("/dashboard/{section}");
    let title = label_for_path(&path).unwrap_or("Section");

    rsx! {
        SectionGuard { path,
            PageHeader {
                PageTitle { "{title}" }
            }
            Card {
                CardHeader {
                    CardTitle { "{title}" }
                    CardDescription { "Nothing here yet." }
                }
                CardContent {
                    p { "Records for this section will appear here." }
                }
            }
        }
    }
}
