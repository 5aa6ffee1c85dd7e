//! [`SectionPayload`](crate::SectionPayload) implementations for the decoded section types.

mod detection_list;
mod pixel_grid;
mod register_map;
