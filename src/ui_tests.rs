#[cfg(test)]
mod tests {
    use crate::ui::{node, Button, DownloadLink, FormField, Section, SignaturePad, TextInput};

    #[test]
    fn text_input_serializes_prefill_and_type_hint() {
        let input = TextInput::new("first_name")
            .text("Ada")
            .field_type("/Tx")
            .single_line(true);
        let val = node(input);
        assert_eq!(val.get("type").and_then(|v| v.as_str()), Some("TextInput"));
        assert_eq!(val.get("bind_key").and_then(|v| v.as_str()), Some("first_name"));
        assert_eq!(val.get("text").and_then(|v| v.as_str()), Some("Ada"));
        assert_eq!(val.get("field_type").and_then(|v| v.as_str()), Some("/Tx"));
        assert!(val.get("hint").is_none());
    }

    #[test]
    fn form_field_labels_its_input() {
        let val = node(FormField::new("Last name", TextInput::new("last_name").text("")));
        assert_eq!(val.get("type").and_then(|v| v.as_str()), Some("FormField"));
        assert_eq!(val.get("label").and_then(|v| v.as_str()), Some("Last name"));
        assert_eq!(val.get("label_for").and_then(|v| v.as_str()), Some("last_name"));
        assert_eq!(
            val.pointer("/input/text").and_then(|v| v.as_str()),
            Some("")
        );
    }

    #[test]
    fn button_omits_enabled_unless_disabled() {
        let on = node(Button::new("Submit", "submit").enabled(true));
        assert!(on.get("enabled").is_none());
        let off = node(Button::new("Submit", "submit").enabled(false));
        assert_eq!(off.get("enabled").and_then(|v| v.as_bool()), Some(false));
    }

    #[test]
    fn section_and_pad_and_link_carry_their_fields() {
        let section = node(Section::new("result-section", vec![]).title("Done"));
        assert_eq!(section.get("id").and_then(|v| v.as_str()), Some("result-section"));
        assert_eq!(section.get("title").and_then(|v| v.as_str()), Some("Done"));

        let pad = node(SignaturePad::new("signature_stroke", 500, 200).stroke_count(3));
        assert_eq!(pad.get("stroke_count").and_then(|v| v.as_u64()), Some(3));
        assert_eq!(pad.get("background").and_then(|v| v.as_str()), Some("#ffffff"));

        let link = node(DownloadLink::new("Download", "/tmp/filled.pdf", 12));
        assert_eq!(link.get("size_bytes").and_then(|v| v.as_u64()), Some(12));
        assert_eq!(link.get("mime_type").and_then(|v| v.as_str()), Some("application/pdf"));
    }
}
