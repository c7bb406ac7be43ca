//! aptitude-report: certificate and results page rendering.

pub mod certificate;
pub mod html;

pub use certificate::{
    certificate_file_name, render_certificate, render_certificate_with, write_certificate,
    CertificateStyle,
};
pub use html::{generate_html, write_html_report};
