use std::future::Future;
use std::pin::Pin;

use actix_web::dev::Payload as RequestPayload;
use actix_web::web::{self, Bytes};
use actix_web::{Either, Error, FromRequest, HttpRequest};
use serde::de::DeserializeOwned;

/// JSON 과 HTML 폼 본문을 모두 받는다. 본문이 비어 있으면 `T::default()` 로 취급한다.
pub struct Payload<T>(pub T);

impl<T> Payload<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> FromRequest for Payload<T>
where
    T: DeserializeOwned + Default + 'static,
{
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(req: &HttpRequest, payload: &mut RequestPayload) -> Self::Future {
        let req = req.clone();
        let body = Bytes::from_request(&req, payload);

        Box::pin(async move {
            let bytes = body.await?;
            // 본문 없는 PUT/DELETE 는 `_id` 누락으로 응답해야 한다
            if bytes.is_empty() {
                return Ok(Payload(T::default()));
            }

            let mut buffered = RequestPayload::from(bytes);
            let request = Either::<web::Json<T>, web::Form<T>>::from_request(&req, &mut buffered)
                .await
                .map_err(Error::from)?;

            Ok(Payload(match request {
                Either::Left(json) => json.into_inner(),
                Either::Right(form) => form.into_inner(),
            }))
        })
    }
}
