use crate::pages::RenderedPage;
use bytes::Bytes;
use http::{StatusCode, header};
use pingora::prelude::Session;
use pingora_http::ResponseHeader;

/// Write a rendered page. `head_only` keeps the headers, including
/// `Content-Length`, and drops the body.
pub(crate) async fn write_page(
    session: &mut Session,
    page: RenderedPage,
    head_only: bool,
) -> pingora::Result<()> {
    let mut resp = ResponseHeader::build(StatusCode::OK, Some(page.headers.len()))?;
    for (name, value) in page.headers {
        resp.insert_header(name, value)?;
    }

    session.write_response_header(Box::new(resp), head_only).await?;
    if !head_only {
        session
            .write_response_body(Some(Bytes::from(page.body)), true)
            .await?;
    }

    Ok(())
}

pub(crate) async fn write_text(
    session: &mut Session,
    status: StatusCode,
    body: String,
) -> pingora::Result<()> {
    let body = Bytes::from(body);

    let mut resp = ResponseHeader::build(status, Some(2))?;
    resp.insert_header(header::CONTENT_TYPE, "text/plain; charset=utf-8")?;
    resp.insert_header(header::CONTENT_LENGTH, body.len().to_string())?;

    session.write_response_header(Box::new(resp), false).await?;
    session.write_response_body(Some(body), true).await?;

    Ok(())
}
