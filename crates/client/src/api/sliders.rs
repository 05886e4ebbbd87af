//! Promotional slider endpoints. Reads are public; writes are admin-only.

use reqwest::Method;
use reqwest::multipart;
use serde::Serialize;

use orchard_core::{Slider, SliderId};

use super::{ApiClient, ImageFile};
use crate::error::ApiError;

/// Fields for creating or updating a slider (multipart, admin only).
#[derive(Debug, Clone)]
pub struct SliderForm {
    pub title: String,
    pub description: String,
    pub button_text: String,
    pub button_link: String,
    pub active: bool,
    pub order: u32,
    /// Omitted on update to keep the existing image.
    pub image: Option<ImageFile>,
}

impl SliderForm {
    fn into_form(self) -> Result<multipart::Form, ApiError> {
        let mut form = multipart::Form::new()
            .text("title", self.title)
            .text("description", self.description)
            .text("buttonText", self.button_text)
            .text("buttonLink", self.button_link)
            .text("active", self.active.to_string())
            .text("order", self.order.to_string());
        if let Some(image) = self.image {
            form = form.part("image", image.into_part()?);
        }
        Ok(form)
    }
}

#[derive(Serialize)]
struct OrderBody {
    order: u32,
}

impl ApiClient {
    /// All sliders, including inactive ones (admin listing).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn sliders(&self) -> Result<Vec<Slider>, ApiError> {
        self.get_json("/sliders").await
    }

    /// Only the active sliders, for the home page.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    pub async fn active_sliders(&self) -> Result<Vec<Slider>, ApiError> {
        self.get_json("/sliders/active").await
    }

    /// Create a slider (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn create_slider(&self, form: SliderForm) -> Result<Slider, ApiError> {
        self.send_multipart(Method::POST, "/sliders", form.into_form()?)
            .await
    }

    /// Update a slider (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn update_slider(&self, id: &SliderId, form: SliderForm) -> Result<Slider, ApiError> {
        self.send_multipart(Method::PUT, &format!("/sliders/{id}"), form.into_form()?)
            .await
    }

    /// Delete a slider (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn delete_slider(&self, id: &SliderId) -> Result<(), ApiError> {
        self.delete_unit(&format!("/sliders/{id}")).await
    }

    /// Move a slider to a new display position (admin).
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or is rejected.
    pub async fn update_slider_order(&self, id: &SliderId, order: u32) -> Result<Slider, ApiError> {
        self.patch_json(&format!("/sliders/{id}/order"), &OrderBody { order })
            .await
    }
}
