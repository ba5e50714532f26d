//! 从代理请求头中解析客户端真实 IP
//!
//! 返回值只在服务位于可信反向代理之后时才可信，这里只负责提取，不做信任校验。

use http::HeaderMap;

/// CDN 写入的单值头
pub const CF_CONNECTING_IP: &str = "cf-connecting-ip";
/// 反向代理写入的单值头
pub const X_REAL_IP: &str = "x-real-ip";
/// 逗号分隔、代理逐跳向右追加的列表头
pub const X_FORWARDED_FOR: &str = "x-forwarded-for";

fn header_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// 解析请求的真实 IP，找不到时原样返回 `fallback`
///
/// 优先级：`CF-Connecting-IP` > `X-Real-IP` > `X-Forwarded-For` 最右侧的非空项
pub fn real_user_ip(headers: &HeaderMap, fallback: &str) -> String {
    if let Some(ip) = header_value(headers, CF_CONNECTING_IP) {
        return ip.to_string();
    }

    if let Some(ip) = header_value(headers, X_REAL_IP) {
        return ip.to_string();
    }

    if let Some(list) = header_value(headers, X_FORWARDED_FOR) {
        if let Some(ip) = list.rsplit(',').map(str::trim).find(|ip| !ip.is_empty()) {
            return ip.to_string();
        }
    }

    fallback.to_string()
}
