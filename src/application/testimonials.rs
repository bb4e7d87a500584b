use vitrine_content_types::{AllTestimonialsQuery, Testimonial};

use crate::application::content::ContentError;

/// Source of the index used to choose a testimonial for a page.
pub trait TestimonialPicker: Send + Sync {
    /// Return an index in `0..len`; `len` is never zero.
    fn pick_index(&self, len: usize) -> usize;
}

/// Uniform choice from the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformPicker;

impl TestimonialPicker for UniformPicker {
    fn pick_index(&self, len: usize) -> usize {
        rand::random_range(0..len)
    }
}

/// Always picks the same position, wrapping around the collection.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPicker(pub usize);

impl TestimonialPicker for FixedPicker {
    fn pick_index(&self, len: usize) -> usize {
        self.0 % len
    }
}

pub fn pick_testimonial(
    response: AllTestimonialsQuery,
    picker: &dyn TestimonialPicker,
) -> Result<Testimonial, ContentError> {
    let mut entries = response.data.testimonials_connection.testimonials;
    if entries.is_empty() {
        return Err(ContentError::EmptyTestimonials);
    }
    let index = picker.pick_index(entries.len()).min(entries.len() - 1);
    Ok(entries.swap_remove(index).testimonial)
}

#[cfg(test)]
mod tests {
    use vitrine_content_types::{TestimonialEntry, TestimonialsConnection, TestimonialsData};

    use super::*;

    fn response(names: &[&str]) -> AllTestimonialsQuery {
        AllTestimonialsQuery {
            data: TestimonialsData {
                testimonials_connection: TestimonialsConnection {
                    testimonials: names
                        .iter()
                        .map(|name| TestimonialEntry {
                            testimonial: Testimonial {
                                name: name.to_string(),
                                ..Testimonial::default()
                            },
                        })
                        .collect(),
                },
            },
        }
    }

    #[test]
    fn fixed_picker_selects_requested_entry() {
        let picked = pick_testimonial(response(&["a", "b", "c"]), &FixedPicker(2)).expect("pick");
        assert_eq!(picked.name, "c");
    }

    #[test]
    fn empty_collection_is_an_error() {
        let err = pick_testimonial(response(&[]), &UniformPicker).expect_err("empty");
        assert!(matches!(err, ContentError::EmptyTestimonials));
    }

    #[test]
    fn uniform_picker_stays_in_bounds() {
        for len in 1..50 {
            assert!(UniformPicker.pick_index(len) < len);
        }
    }
}
