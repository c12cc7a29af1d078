//! Object-URL handles for downloaded documents.
//!
//! A fetched binary payload is wrapped into a locally dereferenceable blob
//! URL. The handle owns browser-side memory; callers must call
//! [`DocumentHandle::revoke`] once the document has been presented, otherwise
//! the blob stays alive until the page unloads.

use super::ApiError;

/// Dereferenceable handle to a downloaded document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHandle {
    url: String,
}

impl DocumentHandle {
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Release the underlying blob. Consumes the handle; the URL is invalid
    /// afterwards.
    pub fn revoke(self) {
        #[cfg(not(feature = "ssr"))]
        {
            let _ = web_sys::Url::revoke_object_url(&self.url);
        }
    }
}

#[cfg(feature = "ssr")]
impl DocumentHandle {
    pub fn trigger_download(&self, _filename: &str) {}
}

#[cfg(not(feature = "ssr"))]
impl DocumentHandle {
    /// Wrap raw bytes into a blob URL, tagging the MIME type when the
    /// backend supplied one.
    pub fn from_bytes(bytes: &[u8], mime: Option<&str>) -> Result<Self, ApiError> {
        let array = js_sys::Uint8Array::from(bytes);
        let parts = js_sys::Array::new();
        parts.push(&array);

        let options = web_sys::BlobPropertyBag::new();
        if let Some(mime) = mime {
            options.set_type(mime);
        }
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|e| ApiError::Network(format!("{e:?}")))?;
        let url = web_sys::Url::create_object_url_with_blob(&blob)
            .map_err(|e| ApiError::Network(format!("{e:?}")))?;
        Ok(Self { url })
    }

    /// Offer the document to the user as a download via a synthetic anchor
    /// click. The handle stays valid; revoke it afterwards.
    pub fn trigger_download(&self, filename: &str) {
        use wasm_bindgen::JsCast;

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let Ok(element) = document.create_element("a") else {
            return;
        };
        let Ok(anchor) = element.dyn_into::<web_sys::HtmlAnchorElement>() else {
            return;
        };
        anchor.set_href(&self.url);
        anchor.set_download(filename);
        anchor.click();
    }
}
