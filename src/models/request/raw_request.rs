//! Request as received by the listener, independent of the HTTP framework.

#[derive(Debug, Clone, Default)]
pub struct RawRequest {
    pub method: String,
    /// Header name/value pairs in arrival order; names as sent.
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
    pub query: Vec<(String, String)>,
    /// Text fields of a submitted form. Empty unless the form was decoded.
    pub form: Vec<(String, String)>,
    pub remote_addr: Option<String>,
}
