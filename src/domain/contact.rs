use super::*;
use serde::{Serialize, Serializer, ser::SerializeStruct};

/// Image handle used by contacts that carry no photo of their own.
pub const DEFAULT_IMAGE_REF: &str = "defaultImage";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    id: Uuid,
    image_ref: String,
    image_bytes: Option<Vec<u8>>,
    name: String,
    phone: String,
    email: String,
}

impl Contact {
    /// Builds a contact with a freshly generated id.
    ///
    /// A supplied photo gets its own image handle, otherwise the contact
    /// points at [`DEFAULT_IMAGE_REF`].
    pub fn new(image_bytes: Option<Vec<u8>>, name: String, phone: String, email: String) -> Self {
        Contact {
            id: Uuid::new_v4(),
            image_ref: image_ref_for(&image_bytes),
            image_bytes,
            name,
            phone,
            email,
        }
    }

    /// Copy of this contact with new display fields. Id and photo are kept.
    pub fn with_details(&self, name: String, phone: String, email: String) -> Self {
        Contact {
            id: self.id,
            image_ref: self.image_ref.clone(),
            image_bytes: self.image_bytes.clone(),
            name,
            phone,
            email,
        }
    }

    /// Copy of this contact with the photo swapped out.
    pub fn with_image(&self, image_bytes: Option<Vec<u8>>) -> Self {
        Contact {
            id: self.id,
            image_ref: image_ref_for(&image_bytes),
            image_bytes,
            name: self.name.clone(),
            phone: self.phone.clone(),
            email: self.email.clone(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn image_ref(&self) -> &str {
        &self.image_ref
    }

    pub fn image_bytes(&self) -> Option<&[u8]> {
        self.image_bytes.as_deref()
    }

    pub fn has_photo(&self) -> bool {
        self.image_bytes.is_some()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &str {
        &self.phone
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

// Photo bytes stay out of exports; only their presence is reported.
impl Serialize for Contact {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Contact", 6)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("image_ref", &self.image_ref)?;
        state.serialize_field("has_photo", &self.has_photo())?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("phone", &self.phone)?;
        state.serialize_field("email", &self.email)?;
        state.end()
    }
}

fn image_ref_for(image_bytes: &Option<Vec<u8>>) -> String {
    match image_bytes {
        Some(_) => Uuid::new_v4().to_string(),
        None => DEFAULT_IMAGE_REF.to_string(),
    }
}
