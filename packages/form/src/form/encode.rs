//! Body serialization: urlencoded pairs and multipart parts.

use std::borrow::Cow;
use std::io::{self, Read, Seek, Write};

use url::form_urlencoded;

use crate::form::store::{FieldStore, FileStore};

const COPY_CHUNK: usize = 8192;

/// Render every field/value pair as `application/x-www-form-urlencoded`,
/// in field-insertion then value-insertion order. Empty when there are no
/// fields.
pub(crate) fn urlencoded(fields: &FieldStore) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (name, values) in fields.iter() {
        for value in values {
            serializer.append_pair(name, value);
        }
    }
    serializer.finish()
}

/// Render the full multipart body: leading CRLF, all field parts, then all
/// file parts with their sources streamed in bounded chunks, then the
/// terminal delimiter.
pub(crate) fn multipart(
    fields: &FieldStore,
    files: &mut FileStore,
    boundary: &str,
) -> io::Result<Vec<u8>> {
    let mut body = Vec::new();
    body.extend_from_slice(b"\r\n");
    for (name, values) in fields.iter() {
        for value in values {
            write!(body, "--{boundary}\r\n")?;
            write!(
                body,
                "Content-Disposition: form-data; name=\"{}\"\r\n",
                escape_quoted(name)
            )?;
            write!(body, "\r\n{value}\r\n")?;
        }
    }
    for (name, uploads) in files.iter_mut() {
        for upload in uploads.iter_mut() {
            write!(body, "--{boundary}\r\n")?;
            write!(
                body,
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                escape_quoted(name),
                escape_quoted(&upload.filename)
            )?;
            write!(body, "Content-Type: {}\r\n\r\n", upload.mime)?;
            upload.source.rewind()?;
            let mut chunk = [0u8; COPY_CHUNK];
            loop {
                let n = upload.source.read(&mut chunk)?;
                if n == 0 {
                    break;
                }
                body.extend_from_slice(&chunk[..n]);
            }
            body.extend_from_slice(b"\r\n");
        }
    }
    write!(body, "--{boundary}--\r\n")?;
    Ok(body)
}

/// Escape a quoted-string disposition parameter: backslash and quote.
fn escape_quoted(value: &str) -> Cow<'_, str> {
    if value.contains(['\\', '"']) {
        Cow::Owned(value.replace('\\', "\\\\").replace('"', "\\\""))
    } else {
        Cow::Borrowed(value)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use crate::error::FieldKind;
    use crate::form::store::Upload;

    use super::*;

    #[test]
    fn urlencoded_pairs_in_insertion_order() {
        let mut fields = FieldStore::new(FieldKind::Field);
        fields.insert("auth[user]", "alice".into()).unwrap();
        fields.insert("auth[pass]", "secret".into()).unwrap();
        assert_eq!(
            urlencoded(&fields),
            "auth%5Buser%5D=alice&auth%5Bpass%5D=secret"
        );
    }

    #[test]
    fn urlencoded_empty_without_fields() {
        let fields = FieldStore::new(FieldKind::Field);
        assert_eq!(urlencoded(&fields), "");
    }

    #[test]
    fn multipart_single_file_matches_wire_format() {
        let fields = FieldStore::new(FieldKind::Field);
        let mut files = FileStore::new(FieldKind::File);
        files
            .insert(
                "files[]",
                Upload {
                    filename: "readme.txt".to_string(),
                    mime: "text/plain; charset=UTF-8".to_string(),
                    source: Box::new(Cursor::new(b"hello, world!".to_vec())),
                },
            )
            .unwrap();
        let body = multipart(&fields, &mut files, "B").unwrap();
        let expected = "\r\n--B\r\nContent-Disposition: form-data; name=\"files[]\"; \
                        filename=\"readme.txt\"\r\nContent-Type: text/plain; charset=UTF-8\
                        \r\n\r\nhello, world!\r\n--B--\r\n";
        assert_eq!(body, expected.as_bytes());
    }

    #[test]
    fn fields_precede_files_in_registration_order() {
        let mut fields = FieldStore::new(FieldKind::Field);
        fields.insert("a", "1".into()).unwrap();
        fields.insert("b[]", "2".into()).unwrap();
        fields.insert("b[]", "3".into()).unwrap();
        let mut files = FileStore::new(FieldKind::File);
        for (i, content) in ["x", "y"].iter().enumerate() {
            files
                .insert(
                    "up[]",
                    Upload {
                        filename: format!("f{i}.txt"),
                        mime: "text/plain".to_string(),
                        source: Box::new(Cursor::new(content.as_bytes().to_vec())),
                    },
                )
                .unwrap();
        }
        let body = String::from_utf8(multipart(&fields, &mut files, "B").unwrap()).unwrap();
        let order = [
            "name=\"a\"",
            "name=\"b[]\"\r\n\r\n2",
            "name=\"b[]\"\r\n\r\n3",
            "filename=\"f0.txt\"",
            "filename=\"f1.txt\"",
        ];
        let mut pos = 0;
        for marker in order {
            let at = body[pos..].find(marker).expect(marker);
            pos += at;
        }
    }

    #[test]
    fn quoted_parameters_are_escaped() {
        let mut fields = FieldStore::new(FieldKind::Field);
        fields.insert("say \"hi\"", "v".into()).unwrap();
        let mut files = FileStore::new(FieldKind::File);
        files
            .insert(
                "up",
                Upload {
                    filename: "we\\ird\".txt".to_string(),
                    mime: "text/plain".to_string(),
                    source: Box::new(Cursor::new(b"x".to_vec())),
                },
            )
            .unwrap();
        let body = String::from_utf8(multipart(&fields, &mut files, "B").unwrap()).unwrap();
        assert!(body.contains("name=\"say \\\"hi\\\"\""));
        assert!(body.contains("filename=\"we\\\\ird\\\".txt\""));
    }
}
