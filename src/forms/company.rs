use std::path::PathBuf;

use crate::error::ValidationError;
use crate::forms::upload::LOGO_POLICY;
use crate::http::MultipartForm;

#[derive(Debug, Clone, Default)]
pub struct CompanyForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub logo: Option<PathBuf>,
}

impl CompanyForm {
    /// Validate the fields and load the logo; the logo is refused before it
    /// is read when its type or size is wrong.
    pub fn to_multipart(&self) -> Result<MultipartForm, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::new("name", "Company name is required"));
        }
        let email = self.email.trim();
        if !email.contains('@') {
            return Err(ValidationError::new("email", "Company email is not valid"));
        }

        let form = MultipartForm::new()
            .text("name", name)
            .text("email", email)
            .text_opt("phone", self.phone.as_deref().map(str::trim))
            .text_opt("address", self.address.as_deref().map(str::trim));

        match &self.logo {
            Some(path) => Ok(form.file(LOGO_POLICY.load(path)?)),
            None => Ok(form),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_and_email_are_required() {
        let form = CompanyForm {
            email: "hr@acme.id".into(),
            ..Default::default()
        };
        assert_eq!(form.to_multipart().unwrap_err().field, "name");
    }

    #[test]
    fn unsupported_logo_is_refused() {
        let form = CompanyForm {
            name: "Acme".into(),
            email: "hr@acme.id".into(),
            logo: Some(PathBuf::from("logo.bmp")),
            ..Default::default()
        };
        assert_eq!(form.to_multipart().unwrap_err().field, "logo");
    }

    #[test]
    fn fields_without_logo() {
        let form = CompanyForm {
            name: " Acme ".into(),
            email: "hr@acme.id".into(),
            phone: Some("021555".into()),
            ..Default::default()
        };
        let body = form.to_multipart().unwrap();
        assert_eq!(body.field("name"), Some("Acme"));
        assert_eq!(body.field("phone"), Some("021555"));
        assert!(body.files.is_empty());
    }
}
