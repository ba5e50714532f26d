use crate::log::client_ip::real_user_ip;
use crate::log::record::{BaseFields, RequestAuth, RequestRecord};
use http::header::{REFERER, USER_AGENT};
use http::{request::Parts, HeaderMap, StatusCode};
use std::net::{IpAddr, SocketAddr};

/// 记录请求时读取的上下文
///
/// 只在捕获时读取一次，之后请求的变化不会反映到记录中
pub trait RequestContext {
    /// 原始请求方法
    fn method(&self) -> &str;

    /// 请求 URI（路径加查询串）
    fn uri(&self) -> String;

    /// 响应状态码
    fn status(&self) -> u16;

    /// 传输层对端地址，通常为 `ip:port`
    fn remote_addr(&self) -> &str;

    fn headers(&self) -> &HeaderMap;

    /// 是否以管理员身份认证
    fn is_admin(&self) -> bool {
        false
    }

    /// 是否以普通认证记录身份认证
    fn is_auth_record(&self) -> bool {
        false
    }
}

/// 从 `host:port` 中取出 host，无法解析时返回空串
pub fn split_host(addr: &str) -> String {
    if let Ok(socket) = addr.parse::<SocketAddr>() {
        return socket.ip().to_string();
    }
    if let Ok(ip) = addr.parse::<IpAddr>() {
        return ip.to_string();
    }
    match addr.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() && port.parse::<u16>().is_ok() => host.to_string(),
        _ => String::new(),
    }
}

fn header_str(headers: &HeaderMap, name: http::header::HeaderName) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}

/// 把请求上下文快照为一条 [`RequestRecord`]
pub fn capture(ctx: &impl RequestContext) -> RequestRecord {
    let headers = ctx.headers();
    let remote_ip = split_host(ctx.remote_addr());

    RequestRecord {
        base: BaseFields::new(),
        url: ctx.uri(),
        method: ctx.method().to_lowercase(),
        status: ctx.status(),
        auth: RequestAuth::from_flags(ctx.is_admin(), ctx.is_auth_record()),
        user_ip: real_user_ip(headers, &remote_ip),
        remote_ip,
        referer: header_str(headers, REFERER),
        user_agent: header_str(headers, USER_AGENT),
        meta: Default::default(),
    }
}

/// 基于 `http` 类型的请求上下文
pub struct HttpExchange<'a> {
    parts: &'a Parts,
    status: StatusCode,
    remote_addr: String,
    auth: RequestAuth,
}

impl<'a> HttpExchange<'a> {
    pub fn new(parts: &'a Parts, status: StatusCode) -> Self {
        Self {
            parts,
            status,
            remote_addr: String::new(),
            auth: RequestAuth::Guest,
        }
    }

    pub fn with_remote_addr(mut self, addr: Option<SocketAddr>) -> Self {
        self.remote_addr = addr.map(|a| a.to_string()).unwrap_or_default();
        self
    }

    pub fn with_auth(mut self, auth: RequestAuth) -> Self {
        self.auth = auth;
        self
    }
}

impl RequestContext for HttpExchange<'_> {
    fn method(&self) -> &str {
        self.parts.method.as_str()
    }

    fn uri(&self) -> String {
        self.parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| "/".to_string())
    }

    fn status(&self) -> u16 {
        self.status.as_u16()
    }

    fn remote_addr(&self) -> &str {
        &self.remote_addr
    }

    fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    fn is_admin(&self) -> bool {
        self.auth == RequestAuth::Admin
    }

    fn is_auth_record(&self) -> bool {
        self.auth == RequestAuth::AuthRecord
    }
}
